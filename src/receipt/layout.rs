//! Page layout - turns layout-tagged receipt lines into positioned text blocks
//!
//! All coordinates are millimetres measured from the top-left corner of the
//! page. `y` is the text baseline. Drawing backends flip the axis as needed.

use super::money::{format_amount, CURRENCY_SYMBOL};
use super::template::{FontStyle, LineContent, LineLayout, ReceiptDocument, TITLE};

/// Millimetres per typographic point
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Width of rendered text, in millimetres
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f32, style: FontStyle) -> f32;
}

/// Every character advances by the same width, whatever the font size.
/// Used for plain-text output where one character is one column.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance {
    pub mm_per_char: f32,
}

impl TextMeasure for FixedAdvance {
    fn text_width(&self, text: &str, _font_size: f32, _style: FontStyle) -> f32 {
        text.chars().count() as f32 * self.mm_per_char
    }
}

/// Where the letterhead logo goes (top-left corner and width)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoPlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

/// Fixed A4 receipt page
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub left_margin: f32,
    pub right_margin: f32,
    pub line_height: f32,
    pub font_size: f32,
    pub title_font_size: f32,
    /// Top of the title row
    pub title_top: f32,
    /// Top of the first body row
    pub body_top: f32,
    pub logo: LogoPlacement,
    /// Left edge of the currency symbol column
    pub currency_x: f32,
    pub currency_width: f32,
    /// Slot the amount is right-aligned in, right after the symbol column
    pub amount_width: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            left_margin: 10.0,
            right_margin: 10.0,
            line_height: 10.0,
            font_size: 12.0,
            title_font_size: 15.0,
            title_top: 20.0,
            body_top: 50.0,
            logo: LogoPlacement {
                x: 10.0,
                y: 8.0,
                width: 30.0,
            },
            currency_x: 130.0,
            currency_width: 5.0,
            amount_width: 40.0,
        }
    }
}

impl PageGeometry {
    /// Right edge shared by every amount on the page
    pub fn amount_right_edge(&self) -> f32 {
        self.currency_x + self.currency_width + self.amount_width
    }

    /// Baseline of text vertically centred in a row starting at `row_top`
    fn baseline(&self, row_top: f32, font_size: f32) -> f32 {
        row_top + self.line_height / 2.0 + font_size * MM_PER_PT * 0.35
    }
}

/// A run of text at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub style: FontStyle,
}

/// Everything drawn on one receipt page, except the logo
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub blocks: Vec<TextBlock>,
}

/// Position the letterhead title and every body line of `document`.
///
/// Body rows that would start below the page bottom are dropped.
pub fn layout_page(
    document: &ReceiptDocument,
    geometry: &PageGeometry,
    measure: &dyn TextMeasure,
) -> PageLayout {
    let g = geometry;
    let right_edge = g.width - g.right_margin;
    let mut blocks = Vec::new();

    let title_width = measure.text_width(TITLE, g.title_font_size, FontStyle::Regular);
    blocks.push(TextBlock {
        text: TITLE.to_string(),
        x: right_edge - title_width,
        y: g.baseline(g.title_top, g.title_font_size),
        font_size: g.title_font_size,
        style: FontStyle::Regular,
    });

    for (index, line) in document.lines.iter().enumerate() {
        let row_top = g.body_top + index as f32 * g.line_height;
        if row_top >= g.height {
            break;
        }
        let y = g.baseline(row_top, g.font_size);
        let block = |text: String, x: f32| TextBlock {
            text,
            x,
            y,
            font_size: g.font_size,
            style: line.style,
        };

        match (&line.content, line.layout) {
            (LineContent::Blank, _) => {}
            (LineContent::Amount { label, amount }, LineLayout::AmountColumns) => {
                let amount = format_amount(*amount);
                let amount_width = measure.text_width(&amount, g.font_size, line.style);
                blocks.push(block(format!("{}:", label), g.left_margin));
                blocks.push(block(CURRENCY_SYMBOL.to_string(), g.currency_x));
                blocks.push(block(amount, g.amount_right_edge() - amount_width));
            }
            (_, layout) => {
                let text = line.to_string();
                let width = measure.text_width(&text, g.font_size, line.style);
                let x = match layout {
                    LineLayout::Center => (g.width - width) / 2.0,
                    LineLayout::Right => right_edge - width,
                    LineLayout::Left | LineLayout::AmountColumns => g.left_margin,
                };
                blocks.push(block(text, x));
            }
        }
    }

    PageLayout { blocks }
}

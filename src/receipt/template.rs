//! Receipt template - `DuesRecord` → ordered, layout-tagged lines

use super::money::{format_amount, CURRENCY_SYMBOL};
use crate::types::DuesRecord;
use chrono::NaiveDateTime;
use std::fmt;

/// Timestamp format shared by every receipt of a batch
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Letterhead title drawn beside the logo
pub const TITLE: &str = "INTEGRITY COURT RESIDENTS ASSOCIATION (LANDLORD)";

pub const SIGNATURE_CAPTION: &str = "Authorized Signatory";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
}

/// Horizontal placement of one body line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineLayout {
    #[default]
    Left,
    Center,
    Right,
    /// Label at the margin, currency symbol column, right-aligned amount slot
    AmountColumns,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineContent {
    Text(String),
    Amount { label: String, amount: i64 },
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    pub content: LineContent,
    pub layout: LineLayout,
    pub style: FontStyle,
}

impl ReceiptLine {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: LineContent::Text(text.into()),
            layout: LineLayout::Left,
            style: FontStyle::Regular,
        }
    }

    pub fn amount(label: impl Into<String>, amount: i64) -> Self {
        Self {
            content: LineContent::Amount {
                label: label.into(),
                amount,
            },
            layout: LineLayout::AmountColumns,
            style: FontStyle::Regular,
        }
    }

    pub fn blank() -> Self {
        Self {
            content: LineContent::Blank,
            layout: LineLayout::Left,
            style: FontStyle::Regular,
        }
    }

    pub fn aligned(mut self, layout: LineLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn bold(mut self) -> Self {
        self.style = FontStyle::Bold;
        self
    }
}

impl fmt::Display for ReceiptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            LineContent::Text(text) => f.write_str(text),
            LineContent::Amount { label, amount } => {
                write!(f, "{}: {}{}", label, CURRENCY_SYMBOL, format_amount(*amount))
            }
            LineContent::Blank => Ok(()),
        }
    }
}

/// One household's receipt, ready to be laid out on a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptDocument {
    pub house: String,
    pub lines: Vec<ReceiptLine>,
}

impl ReceiptDocument {
    /// Plain text of every body line, in order
    pub fn text_lines(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }
}

/// Build the receipt for `record`. `timestamp` is captured once per batch.
pub fn render(record: &DuesRecord, timestamp: &NaiveDateTime) -> ReceiptDocument {
    let mut lines = vec![
        ReceiptLine::text(timestamp.format(TIMESTAMP_FORMAT).to_string())
            .aligned(LineLayout::Right),
        ReceiptLine::text(format!("Landlord: {}", record.landlord)),
        ReceiptLine::text(format!("House {}", record.house)).aligned(LineLayout::Center),
        ReceiptLine::text("=".repeat(40)),
        ReceiptLine::amount("Total Bill Due", record.total_bill_due),
        ReceiptLine::text("Breakdown:").bold(),
    ];

    lines.extend(
        record
            .breakdown()
            .iter()
            .map(|(label, amount)| ReceiptLine::amount(format!("  - {}", label), *amount)),
    );

    lines.push(ReceiptLine::blank());
    lines.push(ReceiptLine::text("Payments:"));
    lines.extend(
        record
            .payments()
            .iter()
            .map(|(label, amount)| ReceiptLine::amount(format!("  - {}", label), *amount)),
    );

    lines.push(ReceiptLine::blank());
    lines.push(ReceiptLine::text("-".repeat(30)));
    lines.push(ReceiptLine::text(SIGNATURE_CAPTION));

    ReceiptDocument {
        house: record.house.clone(),
        lines,
    }
}

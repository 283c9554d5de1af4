//! Plain-text receipts laid out on a character grid

use crate::error::ReceiptResult;
use crate::receipt::{layout_page, FixedAdvance, PageGeometry, ReceiptDocument};

use super::DocumentWriter;

/// Renders the same page layout as the PDF writer, one character per
/// `mm_per_char` millimetres and one text row per page row.
#[derive(Debug, Clone)]
pub struct TextWriter {
    geometry: PageGeometry,
    measure: FixedAdvance,
}

impl Default for TextWriter {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            measure: FixedAdvance { mm_per_char: 2.5 },
        }
    }
}

impl TextWriter {
    /// Lay the receipt out and return its rows, trailing spaces trimmed
    pub fn render_rows(&self, document: &ReceiptDocument) -> Vec<String> {
        let layout = layout_page(document, &self.geometry, &self.measure);
        let Some(first_y) = layout
            .blocks
            .iter()
            .map(|b| b.y)
            .min_by(|a, b| a.total_cmp(b))
        else {
            return Vec::new();
        };

        let mut grid: Vec<Vec<char>> = Vec::new();
        for block in &layout.blocks {
            let row = ((block.y - first_y) / self.geometry.line_height).round() as usize;
            let col = (block.x / self.measure.mm_per_char).round().max(0.0) as usize;
            if grid.len() <= row {
                grid.resize(row + 1, Vec::new());
            }
            let line = &mut grid[row];
            for (offset, ch) in block.text.chars().enumerate() {
                let at = col + offset;
                if line.len() <= at {
                    line.resize(at + 1, ' ');
                }
                line[at] = ch;
            }
        }

        grid.into_iter()
            .map(|line| line.into_iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}

impl DocumentWriter for TextWriter {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn write(&self, document: &ReceiptDocument) -> ReceiptResult<Vec<u8>> {
        let mut out = self.render_rows(document).join("\n");
        out.push('\n');
        Ok(out.into_bytes())
    }
}

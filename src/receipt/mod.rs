//! Receipt formatting
//!
//! A receipt is built in two steps. `template::render` turns a `DuesRecord`
//! into ordered lines, each tagged with a `LineLayout` descriptor. Then
//! `layout::layout_page` positions those lines on a fixed A4 page, so any
//! drawing backend only has to place text blocks.

pub mod layout;
pub mod money;
pub mod template;

pub use layout::{layout_page, FixedAdvance, PageGeometry, PageLayout, TextBlock, TextMeasure};
pub use money::format_amount;
pub use template::{
    render, FontStyle, LineContent, LineLayout, ReceiptDocument, ReceiptLine, TIMESTAMP_FORMAT,
};

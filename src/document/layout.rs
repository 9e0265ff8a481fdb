use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fixed currency suffix on every monetary value.
pub const CURRENCY: &str = "DH";

/// A paginated document as an ordered sequence of blocks, plus the
/// filename it should be saved under.
///
/// The layout carries everything the drawing backend needs; it performs
/// no computation of its own.
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    pub filename: String,
    pub blocks: Vec<Block>,
}

/// Visual emphasis of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    /// Green — e.g. "SOUS GARANTIE".
    Positive,
    /// Red — e.g. "HORS GARANTIE".
    Negative,
}

/// One layout block, drawn top to bottom.
#[derive(Debug, Clone)]
pub enum Block {
    /// Document header: business name plus identity lines on the left,
    /// document title plus meta lines on the right.
    Header {
        business: String,
        business_lines: Vec<String>,
        title: String,
        meta_lines: Vec<String>,
    },
    /// Short colored status line (warranty state).
    Banner { text: String, tone: Tone },
    /// Bold label followed by a short text ("FACTURÉ À: …").
    Labelled { label: String, text: String },
    /// Titled free-text block; cells may hold multiple lines.
    Paragraph {
        title: Option<String>,
        lines: Vec<String>,
    },
    Table(Table),
    /// Right-aligned label/value rows (invoice totals).
    TotalsBox(Vec<(String, String)>),
    /// Centered italic line at the bottom of the last page.
    Footer(String),
}

/// A simple column table. Cells may contain `\n` for multi-line content.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Optional bold footer row: label spanning all but the last column,
    /// value in the last.
    pub footer: Option<(String, String)>,
}

/// Render a monetary amount with exactly 2 decimals and the currency
/// suffix, rounding halves away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2} {CURRENCY}")
}

/// French day/month/year date rendering.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Replace every non-ASCII-alphanumeric character with `_` for use in a
/// filename component.
pub fn sanitize_filename_component(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

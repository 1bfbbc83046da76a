//! Output formats for per-tag summaries.

pub mod table;

use crate::Result;
use crate::summary::SummaryByTag;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Fixed-width table, one row per tag.
    #[default]
    Table,
    /// Pretty-printed JSON object keyed by tag.
    Json,
}

pub fn render(summary: &SummaryByTag, format: Format) -> Result<String> {
    match format {
        Format::Table => Ok(table::render_table(summary)),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(summary)?;
            json.push('\n');
            Ok(json)
        }
    }
}

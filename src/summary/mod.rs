//! Summary reports produced by the histogram tool's `summarize` command.

pub mod parse;
pub mod record;

pub use parse::{parse_summary, parse_summary_file};
pub use record::{SummaryByTag, SummaryRecord};

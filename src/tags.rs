//! Tag discovery in HDR interval logs.
//!
//! A tagged interval log starts with a fixed header block:
//!
//! ```text
//! #[Logged with ...]
//! #[Histogram log format version 1.3]
//! #[StartTime: 1700000000.000 (seconds since epoch), ...]
//! #[BaseTime: 0.000 (seconds since epoch)]
//! "StartTimestamp","Interval_Length","Interval_Max","Interval_Compressed_Histogram"
//! Tag=write,0.127,1.000,8.880,HISTFAAAA...
//! ```
//!
//! Every data row carries `Tag=<name>` as its first column.

use crate::Result;
use anyhow::Context;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

/// Rows before the first data row.
pub const HEADER_ROWS: usize = 5;

/// Length of the `Tag=` prefix of the first column.
const TAG_PREFIX_LEN: usize = 4;

/// Distinct tags in the log at `path`.
pub fn discover_tags(path: &Path) -> Result<BTreeSet<String>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open hdr log {}", path.display()))?;
    read_tags(file).with_context(|| format!("read tags from {}", path.display()))
}

pub fn read_tags<R: Read>(reader: R) -> Result<BTreeSet<String>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut tags = BTreeSet::new();
    for (i, record) in csv.records().enumerate() {
        let record = record.with_context(|| format!("bad csv row {}", i + 1))?;
        if i < HEADER_ROWS {
            continue;
        }
        if let Some(tag) = record.get(0).and_then(tag_of) {
            tags.insert(tag.to_string());
        }
    }
    Ok(tags)
}

/// First column minus the `Tag=` prefix; `None` when nothing is left.
fn tag_of(first_column: &str) -> Option<&str> {
    first_column
        .get(TAG_PREFIX_LEN..)
        .filter(|tag| !tag.is_empty())
}

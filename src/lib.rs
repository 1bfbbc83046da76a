//! Post-processing for HDR histogram logs collected from a load-generation run.
//!
//! A run directory holds one `{name}.hdr` log per client. The pipeline trims
//! every log to a time window, merges the trimmed logs into one file at the
//! root, splits each trimmed log per operation tag and finally summarizes
//! everything, returning the parsed summary of the merged log.

pub mod config;
pub mod discover;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod runner;
pub mod summary;
pub mod tags;
pub mod tools;

pub type Result<T> = anyhow::Result<T>;

pub use config::{TimeWindow, ToolConfig};
pub use error::HdrError;
pub use pipeline::{HdrLogProcessor, process_hdr_file_set};
pub use runner::{CommandOutput, CommandRunner, ConcurrencyGate, Invocation, ProcessRunner};
pub use summary::{SummaryByTag, SummaryRecord, parse_summary, parse_summary_file};

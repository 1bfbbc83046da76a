use crate::Result;
use crate::error::HdrError;
use crate::summary::record::{SummaryByTag, SummaryRecord};
use anyhow::Context;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

const NANOS_PER_MILLI: f64 = 1_000_000.0;
const MILLIS_PER_SECOND: f64 = 1_000.0;

/// Parse a summary report file into per-tag records.
///
/// Expected lines:
/// {tag}.{metric}={value}
///
/// Example:
/// write.99.900ptile=2000000
pub fn parse_summary_file(path: impl AsRef<Path>) -> Result<SummaryByTag> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(HdrError::MissingArtifact(path.to_path_buf()).into());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("read summary file {}", path.display()));
        }
    };
    parse_lines(&text, path).with_context(|| format!("parse summary file {}", path.display()))
}

/// Parse summary report text into per-tag records.
pub fn parse_summary(text: &str) -> Result<SummaryByTag> {
    parse_lines(text, Path::new("<summary>"))
}

fn parse_lines(text: &str, origin: &Path) -> Result<SummaryByTag> {
    // Capture:
    // 1) tag: up to the first '.'
    // 2) metric: rest of the key (may contain '.', e.g. 99.900ptile)
    // 3) value
    const SUMMARY_LINE_RE: &str = r#"^\s*([^.=]+)\.([^=]+?)\s*=\s*(.*?)\s*$"#;
    let re = Regex::new(SUMMARY_LINE_RE)?;

    let mut values: BTreeMap<(String, String), String> = BTreeMap::new();
    let mut tags: BTreeSet<String> = BTreeSet::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let Some(caps) = re.captures(line) else {
            return Err(HdrError::Malformed {
                path: origin.to_path_buf(),
                line: lineno + 1,
                text: line.to_string(),
            }
            .into());
        };

        let tag = caps[1].to_string();
        values.insert((tag.clone(), caps[2].to_string()), caps[3].to_string());
        tags.insert(tag);
    }

    let mut out = SummaryByTag::new();
    for tag in tags {
        let metrics = Metrics {
            tag: &tag,
            values: &values,
        };
        let record = SummaryRecord {
            ops_count: metrics.integer("TotalCount")?,
            stress_time_s: metrics.float("Period(ms)")? / MILLIS_PER_SECOND,
            throughput_per_second: metrics.float("Throughput(ops/sec)")?,
            mean_latency_ms: metrics.float("Mean")? / NANOS_PER_MILLI,
            median_latency_ms: metrics.float("50.000ptile")? / NANOS_PER_MILLI,
            p90_latency_ms: metrics.float("90.000ptile")? / NANOS_PER_MILLI,
            p99_latency_ms: metrics.float("99.000ptile")? / NANOS_PER_MILLI,
            p99_9_latency_ms: metrics.float("99.900ptile")? / NANOS_PER_MILLI,
            p99_99_latency_ms: metrics.float("99.990ptile")? / NANOS_PER_MILLI,
            p99_999_latency_ms: metrics.float("99.999ptile")? / NANOS_PER_MILLI,
        };
        out.insert(tag, record);
    }

    Ok(out)
}

/// Required-key lookups for one tag.
struct Metrics<'a> {
    tag: &'a str,
    values: &'a BTreeMap<(String, String), String>,
}

impl Metrics<'_> {
    fn raw(&self, metric: &str) -> Result<&str> {
        self.values
            .get(&(self.tag.to_string(), metric.to_string()))
            .map(String::as_str)
            .ok_or_else(|| {
                HdrError::MissingKey {
                    tag: self.tag.to_string(),
                    key: metric.to_string(),
                }
                .into()
            })
    }

    fn bad_value(&self, metric: &str, value: &str) -> anyhow::Error {
        HdrError::BadValue {
            key: format!("{}.{}", self.tag, metric),
            value: value.to_string(),
        }
        .into()
    }

    fn float(&self, metric: &str) -> Result<f64> {
        let value = self.raw(metric)?;
        value.parse().map_err(|_| self.bad_value(metric, value))
    }

    fn integer(&self, metric: &str) -> Result<u64> {
        let value = self.raw(metric)?;
        value.parse().map_err(|_| self.bad_value(metric, value))
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Latency and throughput statistics for one operation tag.
///
/// Latencies are in milliseconds, `stress_time_s` in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub ops_count: u64,
    pub stress_time_s: f64,
    pub throughput_per_second: f64,
    pub mean_latency_ms: f64,
    pub median_latency_ms: f64,
    pub p90_latency_ms: f64,
    pub p99_latency_ms: f64,
    pub p99_9_latency_ms: f64,
    pub p99_99_latency_ms: f64,
    pub p99_999_latency_ms: f64,
}

/// One record per tag found in a summary report.
pub type SummaryByTag = BTreeMap<String, SummaryRecord>;

//! Tool locations (tools.json) and the trimming window.
//!
//! JSON shape (every field optional):
//! {
//!   "java": "/usr/lib/jvm/java-1.8.0/bin/java",
//!   "processor_jar": "lib/processor.jar",
//!   "hdr_histogram_jar": "lib/HdrHistogram-2.1.12.jar"
//! }

use crate::Result;
use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Java launcher used for both jars.
    pub java: PathBuf,
    /// Jar exposing `CommandDispatcherMain` (union / summarize).
    pub processor_jar: PathBuf,
    /// HdrHistogram jar providing `HistogramLogProcessor` (per-tag split).
    pub hdr_histogram_jar: PathBuf,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            java: PathBuf::from("java"),
            processor_jar: PathBuf::from("lib/processor.jar"),
            hdr_histogram_jar: PathBuf::from("lib/HdrHistogram-2.1.12.jar"),
        }
    }
}

impl ToolConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("read tool config {}", path.display()))?;
        let config: ToolConfig = serde_json::from_str(&text)
            .with_context(|| format!("parse tool config {}", path.display()))?;
        Ok(config)
    }
}

/// Sample window in seconds since log start. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct TimeWindow {
    pub start: Option<f64>,
    pub end: Option<f64>,
}

impl TimeWindow {
    pub fn new(start: Option<f64>, end: Option<f64>) -> Result<Self> {
        for bound in [start, end].into_iter().flatten() {
            if !bound.is_finite() || bound < 0.0 {
                bail!("time window bound must be a non-negative number, got {}", bound);
            }
        }
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                bail!("time window start {} is after end {}", s, e);
            }
        }
        Ok(Self { start, end })
    }

    /// Window that drops `warmup` seconds at the front and `cooldown` seconds
    /// at the back of a run lasting `duration` seconds.
    pub fn from_run(warmup: f64, duration: f64, cooldown: f64) -> Result<Self> {
        Self::new(Some(warmup), Some(duration - cooldown))
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

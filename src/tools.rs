//! Command lines for the external histogram tools.
//!
//! Trim, merge and summarize go through `CommandDispatcherMain` in the
//! processor jar; the per-tag split uses HdrHistogram's own
//! `HistogramLogProcessor`.

use crate::config::{TimeWindow, ToolConfig};
use crate::runner::Invocation;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const DISPATCHER_CLASS: &str = "CommandDispatcherMain";
const LOG_PROCESSOR_CLASS: &str = "org.HdrHistogram.HistogramLogProcessor";

pub const TRIM: &str = "trim";
pub const MERGE: &str = "merge";
pub const SUMMARIZE: &str = "summarize";
pub const SPLIT: &str = "split";

/// Suffix shared by trimmed per-client files and the merged root file.
pub const TRIMMED_SUFFIX: &str = ".trimmed.hdr";

#[derive(Debug, Clone, Default)]
pub struct HdrTools {
    config: ToolConfig,
}

impl HdrTools {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    fn dispatcher(&self, tool: &'static str) -> Invocation {
        Invocation::new(tool, &self.config.java)
            .arg("-cp")
            .arg(&self.config.processor_jar)
            .arg(DISPATCHER_CLASS)
    }

    /// Window `input` into `output`.
    pub fn trim(&self, input: &Path, output: &Path, window: TimeWindow) -> Invocation {
        let mut inv = self
            .dispatcher(TRIM)
            .args(["union", "-ifp"])
            .arg(input)
            .arg("-of")
            .arg(output);
        if let Some(start) = window.start {
            inv = inv.arg("-start").arg(start.to_string());
        }
        if let Some(end) = window.end {
            inv = inv.arg("-end").arg(end.to_string());
        }
        inv
    }

    /// Union every input into `output`.
    pub fn merge(&self, inputs: &[PathBuf], output: &Path) -> Invocation {
        let mut inv = self.dispatcher(MERGE).arg("union");
        for input in inputs {
            inv = inv.arg("-ifp").arg(input);
        }
        inv.arg("-of").arg(output)
    }

    /// Summary report of `input` on stdout.
    pub fn summarize(&self, input: &Path) -> Invocation {
        self.dispatcher(SUMMARIZE).args(["summarize", "-ifp"]).arg(input)
    }

    /// Extract the samples tagged `tag` from `input` into `output`.
    pub fn split(&self, input: &Path, output: &Path, tag: &str) -> Invocation {
        Invocation::new(SPLIT, &self.config.java)
            .arg("-cp")
            .arg(&self.config.hdr_histogram_jar)
            .arg(LOG_PROCESSOR_CLASS)
            .arg("-i")
            .arg(input)
            .arg("-o")
            .arg(output)
            .arg("-tag")
            .arg(tag)
    }
}

/// `{stem}.trimmed.hdr` next to `input`.
pub fn trimmed_path(input: &Path) -> PathBuf {
    sibling_with(input, TRIMMED_SUFFIX)
}

/// `{stem}-summary.txt` next to `input`.
pub fn summary_path(input: &Path) -> PathBuf {
    sibling_with(input, "-summary.txt")
}

/// `{stem}_{tag}` next to `input`.
pub fn split_path(input: &Path, tag: &str) -> PathBuf {
    sibling_with(input, &format!("_{}", tag))
}

pub fn is_trimmed(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().ends_with(TRIMMED_SUFFIX))
        .unwrap_or(false)
}

/// Replace the last extension of `path` with `suffix`.
fn sibling_with(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_stem().map(|s| s.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

//! Failure taxonomy for the pipeline.
//!
//! Everything in the crate returns `anyhow::Result`; these variants sit at the
//! bottom of the context chain so callers can `downcast_ref::<HdrError>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HdrError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external tool ran but exited unsuccessfully. `status` is `None`
    /// when the process was terminated by a signal.
    #[error("{tool} exited with status {status:?}: {stderr}")]
    ToolFailed {
        tool: String,
        status: Option<i32>,
        stderr: String,
    },

    /// A stage did not produce the file a later stage depends on.
    #[error("expected artifact is missing: {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("no {pattern} files found under {}", dir.display())]
    NoInputs { dir: PathBuf, pattern: String },

    #[error("summary is missing key {tag}.{key}")]
    MissingKey { tag: String, key: String },

    #[error("summary key {key} has non-numeric value {value:?}")]
    BadValue { key: String, value: String },

    #[error("malformed summary line at {}:{line}: {text:?}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        text: String,
    },
}

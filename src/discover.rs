//! Recursive file discovery. Each stage calls this afresh because the
//! previous stage changes what is on disk.

use crate::Result;
use crate::tools::is_trimmed;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Every file named exactly `file_name` under `root` (any depth, `root`
/// included), sorted.
pub fn discover(root: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    // Run directories are named after the workload ("mixed 'ratio(...)'"),
    // so the root is escaped as well as the file name.
    let pattern = Path::new(&glob::Pattern::escape(&root.to_string_lossy()))
        .join("**")
        .join(glob::Pattern::escape(file_name));
    let pattern = pattern.to_string_lossy();
    let mut hits = Vec::new();
    // Hidden directories are skipped, as a shell `**` would.
    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..glob::MatchOptions::new()
    };
    for entry in
        glob::glob_with(&pattern, options).with_context(|| format!("bad glob {}", pattern))?
    {
        let path = entry.with_context(|| format!("scan {}", root.display()))?;
        if path.is_file() {
            hits.push(path);
        }
    }
    hits.sort();
    Ok(hits)
}

/// Raw `{base_name}.hdr` logs that still need trimming.
pub fn trim_inputs(root: &Path, base_name: &str) -> Result<Vec<PathBuf>> {
    let mut files = discover(root, &format!("{}.hdr", base_name))?;
    files.retain(|f| !is_trimmed(f));
    Ok(files)
}

/// Every `{base_name}.trimmed.hdr` under `root`, merged output included.
pub fn trimmed_files(root: &Path, base_name: &str) -> Result<Vec<PathBuf>> {
    discover(root, &format!("{}.trimmed.hdr", base_name))
}

/// Where the merged log of `(root, base_name)` lives.
pub fn merged_path(root: &Path, base_name: &str) -> PathBuf {
    root.join(format!("{}.trimmed.hdr", base_name))
}

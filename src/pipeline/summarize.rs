use crate::Result;
use crate::discover::{merged_path, trimmed_files};
use crate::pipeline::{HdrLogProcessor, join_stage};
use crate::runner::CommandRunner;
use crate::summary::{SummaryByTag, parse_summary_file};
use crate::tools::summary_path;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;

impl<R: CommandRunner> HdrLogProcessor<R> {
    /// Write the summary report of `file` to its `-summary.txt` sibling.
    pub async fn summarize(&self, file: &Path) -> Result<PathBuf> {
        let output = summary_path(file);
        let report = self.run_checked(self.tools.summarize(file)).await?;
        tokio::fs::write(&output, &report.stdout)
            .await
            .with_context(|| format!("write summary {}", output.display()))?;
        Ok(output)
    }

    /// Summarize every trimmed log under `dir`, then parse the report of the
    /// merged log.
    pub async fn summarize_recursively(&self, dir: &Path, base_name: &str) -> Result<SummaryByTag> {
        let files = trimmed_files(dir, base_name)?;
        info!(files = files.len(), "summarizing");
        join_stage("summarize", files.iter().map(|f| self.summarize(f))).await?;

        parse_summary_file(summary_path(&merged_path(dir, base_name)))
    }
}

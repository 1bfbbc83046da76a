use crate::Result;
use crate::discover::trim_inputs;
use crate::error::HdrError;
use crate::pipeline::{HdrLogProcessor, join_stage};
use crate::runner::CommandRunner;
use crate::tools::trimmed_path;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

impl<R: CommandRunner> HdrLogProcessor<R> {
    /// Window one raw log into its `.trimmed.hdr` sibling.
    pub async fn trim(&self, file: &Path) -> Result<PathBuf> {
        let output = trimmed_path(file);
        let invocation = self.tools.trim(file, &output, self.window);
        self.run_checked(invocation).await?;
        if !output.is_file() {
            return Err(HdrError::MissingArtifact(output).into());
        }
        Ok(output)
    }

    /// Trim every raw `{base_name}.hdr` under `dir` concurrently.
    pub async fn trim_recursively(&self, dir: &Path, base_name: &str) -> Result<Vec<PathBuf>> {
        let files = trim_inputs(dir, base_name)?;
        if files.is_empty() {
            warn!(dir = %dir.display(), base_name, "no raw hdr logs to trim");
        }
        info!(files = files.len(), "trimming");

        join_stage("trim", files.iter().map(|f| self.trim(f))).await
    }
}

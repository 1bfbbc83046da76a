use crate::Result;
use crate::discover::{merged_path, trimmed_files};
use crate::error::HdrError;
use crate::pipeline::HdrLogProcessor;
use crate::runner::CommandRunner;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

impl<R: CommandRunner> HdrLogProcessor<R> {
    /// Union every trimmed log under `dir` into `{dir}/{base_name}.trimmed.hdr`
    /// with a single tool invocation.
    pub async fn merge_recursively(&self, dir: &Path, base_name: &str) -> Result<PathBuf> {
        let output = merged_path(dir, base_name);

        // A raw log at the root was just trimmed onto the output path and is
        // a real input. Without one, a file at the output path is the merge
        // of an earlier run and would be counted twice.
        let root_raw = dir.join(format!("{}.hdr", base_name)).is_file();
        let inputs: Vec<PathBuf> = trimmed_files(dir, base_name)?
            .into_iter()
            .filter(|f| root_raw || *f != output)
            .collect();
        if root_raw {
            warn!(
                output = %output.display(),
                "raw log at the run directory root; its trimmed file is merged and then overwritten"
            );
        }
        if inputs.is_empty() {
            return Err(HdrError::NoInputs {
                dir: dir.to_path_buf(),
                pattern: format!("{}.trimmed.hdr", base_name),
            }
            .into());
        }

        info!(inputs = inputs.len(), output = %output.display(), "merging");
        let invocation = self.tools.merge(&inputs, &output);
        self.run_checked(invocation)
            .await
            .with_context(|| format!("merge into {}", output.display()))?;

        if !output.is_file() {
            return Err(HdrError::MissingArtifact(output).into());
        }
        Ok(output)
    }
}

use crate::Result;
use crate::discover::trimmed_files;
use crate::pipeline::{HdrLogProcessor, join_stage};
use crate::runner::CommandRunner;
use crate::tags::discover_tags;
use crate::tools::split_path;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

impl<R: CommandRunner> HdrLogProcessor<R> {
    /// Split one trimmed log into a `{stem}_{tag}` file per tag it contains.
    pub async fn process(&self, file: &Path) -> Result<Vec<PathBuf>> {
        let tags = discover_tags(file)?;
        if tags.is_empty() {
            warn!(file = %file.display(), "no tagged rows; nothing to split");
            return Ok(Vec::new());
        }
        debug!(file = %file.display(), ?tags, "splitting");

        let splits = tags.iter().map(|tag| async move {
            let output = split_path(file, tag);
            self.run_checked(self.tools.split(file, &output, tag)).await?;
            Ok::<_, anyhow::Error>(output)
        });
        join_stage("split", splits).await
    }

    /// Split every trimmed log under `dir`, merged log included. Returns once
    /// every split invocation has finished.
    pub async fn process_recursively(&self, dir: &Path, base_name: &str) -> Result<Vec<PathBuf>> {
        let files = trimmed_files(dir, base_name)?;
        info!(files = files.len(), "splitting by tag");

        let per_file = join_stage("split", files.iter().map(|f| self.process(f))).await?;
        Ok(per_file.into_iter().flatten().collect())
    }
}

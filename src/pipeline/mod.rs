//! Stage orchestration: trim -> merge -> (split, summarize) -> parse.
//!
//! Each stage rescans the run directory, fans out one invocation per file
//! through the shared gate and joins every invocation before returning, so
//! nothing from an earlier stage is still running when the next one starts.

mod merge;
mod split;
mod summarize;
mod trim;

use crate::Result;
use crate::config::{TimeWindow, ToolConfig};
use crate::runner::{CommandOutput, CommandRunner, ConcurrencyGate, Invocation, ProcessRunner};
use crate::summary::SummaryByTag;
use crate::tools::HdrTools;
use futures::future::join_all;
use std::future::Future;
use std::path::Path;
use tracing::info;

/// Runs the full pipeline over one run directory.
///
/// Convenience wrapper sizing the gate from the host and spawning real
/// processes.
pub async fn process_hdr_file_set(
    dir: impl AsRef<Path>,
    base_name: &str,
    tools: ToolConfig,
    time_start: Option<f64>,
    time_end: Option<f64>,
) -> Result<SummaryByTag> {
    let window = TimeWindow::new(time_start, time_end)?;
    HdrLogProcessor::new(tools, window)
        .process_hdr_file_set(dir.as_ref(), base_name)
        .await
}

pub struct HdrLogProcessor<R = ProcessRunner> {
    runner: R,
    gate: ConcurrencyGate,
    tools: HdrTools,
    window: TimeWindow,
}

impl HdrLogProcessor<ProcessRunner> {
    pub fn new(tools: ToolConfig, window: TimeWindow) -> Self {
        Self::with_runner(ProcessRunner, ConcurrencyGate::from_host(), tools, window)
    }
}

impl<R: CommandRunner> HdrLogProcessor<R> {
    pub fn with_runner(
        runner: R,
        gate: ConcurrencyGate,
        tools: ToolConfig,
        window: TimeWindow,
    ) -> Self {
        Self {
            runner,
            gate,
            tools: HdrTools::new(tools),
            window,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    /// Trim, merge, split and summarize every `{base_name}.hdr` under `dir`;
    /// returns the parsed summary of the merged log.
    pub async fn process_hdr_file_set(&self, dir: &Path, base_name: &str) -> Result<SummaryByTag> {
        info!(
            dir = %dir.display(),
            base_name,
            start = ?self.window.start,
            end = ?self.window.end,
            concurrency = self.gate.limit(),
            "processing hdr file set"
        );

        self.trim_recursively(dir, base_name).await?;
        self.merge_recursively(dir, base_name).await?;

        // Both read the merged and trimmed files and write disjoint outputs.
        let (split, summary) = tokio::join!(
            self.process_recursively(dir, base_name),
            self.summarize_recursively(dir, base_name),
        );
        split?;
        let summary = summary?;

        info!(tags = summary.len(), "hdr file set processed");
        Ok(summary)
    }

    /// Run through the gate and fail on a non-zero exit.
    async fn run_checked(&self, invocation: Invocation) -> Result<CommandOutput> {
        self.gate
            .run(&self.runner, &invocation)
            .await?
            .check(&invocation)
    }
}

/// Drive every task to completion, then report the first failure.
///
/// No task is abandoned when another fails; the stage only returns once all
/// of them have finished.
async fn join_stage<T, F>(stage: &str, tasks: impl IntoIterator<Item = F>) -> Result<Vec<T>>
where
    F: Future<Output = Result<T>>,
{
    let results = join_all(tasks).await;
    let total = results.len();

    let mut done = Vec::with_capacity(total);
    let mut first_error = None;
    let mut failed = 0usize;
    for result in results {
        match result {
            Ok(value) => done.push(value),
            Err(err) => {
                failed += 1;
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err.context(format!("{} stage: {} of {} tasks failed", stage, failed, total))),
        None => Ok(done),
    }
}

use crate::Result;
use crate::error::HdrError;
use crate::runner::{CommandOutput, CommandRunner, Invocation};
use anyhow::Context;
use std::process::Stdio;
use tokio::process::Command;

/// Spawns real OS processes. The child is killed if the future driving it is
/// dropped before it exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|source| HdrError::Spawn {
            program: invocation.program.to_string_lossy().into_owned(),
            source,
        })?;

        let output = child
            .wait_with_output()
            .await
            .with_context(|| format!("wait for {}", invocation))?;

        Ok(CommandOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            status: output.status.code(),
        })
    }
}

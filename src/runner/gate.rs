//! Ceiling on concurrently running external commands.

use crate::Result;
use crate::runner::{CommandOutput, CommandRunner, Invocation};
use anyhow::Context;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

/// Semaphore shared by every stage of one pipeline. Cloning shares the
/// underlying permits.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

impl ConcurrencyGate {
    /// Gate admitting at most `limit` commands at once (at least one).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Two commands per usable core. `available_parallelism` honours the
    /// process affinity mask on Linux.
    pub fn from_host() -> Self {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(2 * cores)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Permits not currently held.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Run `invocation` once a permit is free. The permit is held until the
    /// command finishes or this future is dropped.
    pub async fn run<R: CommandRunner>(
        &self,
        runner: &R,
        invocation: &Invocation,
    ) -> Result<CommandOutput> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .context("concurrency gate closed")?;
        debug!(tool = invocation.tool, command = %invocation, "running");
        runner.run(invocation).await
    }
}

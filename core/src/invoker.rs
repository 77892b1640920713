//! Runs external tools and reduces them to a success flag.

use std::io::{self, Write};
use std::process::Command;

use adbwifi_protocols::adb::ToolCommand;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Executes a [`ToolCommand`] and reports whether it exited successfully.
///
/// Failure is a value: implementations never return errors or panic on a bad command.
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn run(&self, command: &ToolCommand) -> bool;

    /// Runs the command on the current thread. Used where awaiting is not possible, such
    /// as from `Drop`.
    fn run_blocking(&self, command: &ToolCommand) -> bool;
}

/// Spawns the command as a child process attached to this terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessInvoker;

impl ProcessInvoker {
    /// Our own buffered output is flushed before the child starts and again after it
    /// exits, so status lines never land in the middle of the child's output.
    fn spawn_and_wait(command: &ToolCommand) -> bool {
        flush_std_streams();
        debug!(%command, "running external command");

        let status = Command::new(command.program())
            .args(command.args())
            .status();

        flush_std_streams();

        match status {
            Ok(status) => {
                debug!(%command, ?status, "external command exited");
                status.success()
            }
            Err(e) => {
                warn!(%command, "failed to start external command: {e}");
                false
            }
        }
    }
}

#[async_trait]
impl Invoker for ProcessInvoker {
    async fn run(&self, command: &ToolCommand) -> bool {
        let command = command.clone();
        tokio::task::spawn_blocking(move || Self::spawn_and_wait(&command))
            .await
            .unwrap_or_else(|e| {
                warn!("external command task failed: {e}");
                false
            })
    }

    fn run_blocking(&self, command: &ToolCommand) -> bool {
        Self::spawn_and_wait(command)
    }
}

pub(crate) fn flush_std_streams() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}

//! # Foreground
//!
//! What the caller does while a [`DeviceSession`] runs in the background: wait for it to
//! finish or for the operator to interrupt, shut discovery down, and list the connected
//! devices on the way out.

use std::sync::Arc;

use adbwifi_common::{error, info};
use adbwifi_protocols::adb::ToolCommand;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::discovery::{self, DiscoveryControl, DiscoveryEvent, WaitOutcome};
use crate::invoker::Invoker;
use crate::session::{DeviceSession, SessionOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Driven {
    pub wait: WaitOutcome,
    /// `None` if the session task panicked.
    pub outcome: Option<SessionOutcome>,
}

/// Runs `session` on its own task and waits for it to finish or for `cancel` to fire.
///
/// On interrupt, completion is marked here and "Cancelled" is reported only if the
/// session had not already finished. Discovery is released in either case before the
/// session task is joined.
pub async fn drive(
    session: DeviceSession,
    events: UnboundedReceiver<DiscoveryEvent>,
    discovery: Arc<dyn DiscoveryControl>,
    cancel: CancellationToken,
) -> Driven {
    let completion = session.completion();
    let task = tokio::spawn(session.run(events, cancel.clone()));

    let wait = discovery::wait_until(&completion, &cancel).await;
    if wait == WaitOutcome::Cancelled {
        if completion.mark() {
            error!("Cancelled");
        }
        discovery.release();
    }

    let outcome = match task.await {
        Ok(outcome) => {
            debug!(?outcome, "device session finished");
            Some(outcome)
        }
        Err(e) => {
            warn!("device session task failed: {e}");
            None
        }
    };

    Driven { wait, outcome }
}

type Preamble = Box<dyn FnOnce() + Send>;

/// Lists connected devices when dropped, so the listing happens on every exit path.
pub struct DeviceListing {
    invoker: Arc<dyn Invoker>,
    command: ToolCommand,
    preamble: Option<Preamble>,
}

impl DeviceListing {
    pub fn new(invoker: Arc<dyn Invoker>, command: ToolCommand) -> Self {
        Self {
            invoker,
            command,
            preamble: None,
        }
    }

    /// Runs right before the listing header is printed.
    pub fn with_preamble(mut self, preamble: impl FnOnce() + Send + 'static) -> Self {
        self.preamble = Some(Box::new(preamble));
        self
    }
}

impl Drop for DeviceListing {
    fn drop(&mut self) {
        if let Some(preamble) = self.preamble.take() {
            preamble();
        }
        info!("Connected devices:");
        self.invoker.run_blocking(&self.command);
    }
}

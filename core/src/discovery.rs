//! # Discovery Session
//!
//! Owns the mDNS browse for the pairing service type and translates daemon events into
//! [`DiscoveryEvent`]s on a channel consumed by the device session.
//!
//! Shutdown is shared: the session releases discovery once it is done, and the
//! foreground may release it again on interrupt. Only the first release does any work.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use adbwifi_common::device::ServiceAdvertisement;
use adbwifi_protocols::mdns;
use mdns_sd::{ServiceDaemon, ServiceEvent};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::completion::Completion;
use crate::error::DiscoveryError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiscoveryEvent {
    /// A service was found and its address information resolved.
    Resolved(ServiceAdvertisement),
    Removed { fullname: String },
}

/// The part of discovery the session is allowed to touch: asking for it to stop.
pub trait DiscoveryControl: Send + Sync {
    /// Releases discovery resources. Safe to call any number of times.
    fn release(&self);
}

/// A running mDNS browse.
pub struct DiscoverySession {
    daemon: ServiceDaemon,
    service_type: String,
    released: AtomicBool,
}

impl DiscoverySession {
    /// Starts browsing for `service_type` and returns the session with its event stream.
    ///
    /// Must be called from within a tokio runtime; the event pump runs as a task.
    pub fn start(
        service_type: &str,
    ) -> Result<(Arc<Self>, UnboundedReceiver<DiscoveryEvent>), DiscoveryError> {
        let daemon = ServiceDaemon::new().map_err(DiscoveryError::Daemon)?;
        let receiver = daemon
            .browse(service_type)
            .map_err(|source| DiscoveryError::Browse {
                service_type: service_type.to_string(),
                source,
            })?;

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(pump_events(receiver, tx));
        debug!(service_type, "mDNS browse started");

        let session = Arc::new(Self {
            daemon,
            service_type: service_type.to_string(),
            released: AtomicBool::new(false),
        });
        Ok((session, rx))
    }

    /// Stops the browse and shuts the daemon down.
    ///
    /// Returns `true` if this call did the shutdown, `false` if it had already happened.
    /// Daemon errors are absorbed.
    pub fn stop(&self) -> bool {
        if self.released.swap(true, Ordering::SeqCst) {
            trace!("discovery already released");
            return false;
        }

        if let Err(e) = self.daemon.stop_browse(&self.service_type) {
            debug!("stopping browse failed: {e}");
        }
        if let Err(e) = self.daemon.shutdown() {
            debug!("mDNS daemon shutdown failed: {e}");
        }
        debug!(service_type = %self.service_type, "discovery released");
        true
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

impl DiscoveryControl for DiscoverySession {
    fn release(&self) {
        self.stop();
    }
}

impl Drop for DiscoverySession {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn pump_events(
    receiver: flume::Receiver<ServiceEvent>,
    tx: UnboundedSender<DiscoveryEvent>,
) {
    while let Ok(event) = receiver.recv_async().await {
        let forwarded = match event {
            ServiceEvent::ServiceResolved(info) => {
                trace!(fullname = info.get_fullname(), "service resolved");
                Some(DiscoveryEvent::Resolved(mdns::to_advertisement(&info)))
            }
            ServiceEvent::ServiceRemoved(_, fullname) => Some(DiscoveryEvent::Removed { fullname }),
            ServiceEvent::ServiceFound(_, fullname) => {
                trace!(%fullname, "service found, waiting for resolution");
                None
            }
            other => {
                trace!(?other, "ignoring mDNS event");
                None
            }
        };

        if let Some(event) = forwarded
            && tx.send(event).is_err()
        {
            break;
        }
    }
    debug!("mDNS event stream closed");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitOutcome {
    Completed,
    Cancelled,
}

/// Blocks the caller until `completion` is marked or `cancel` fires.
///
/// Completion wins when both are ready.
pub async fn wait_until(completion: &Completion, cancel: &CancellationToken) -> WaitOutcome {
    tokio::select! {
        biased;
        _ = completion.wait() => WaitOutcome::Completed,
        _ = cancel.cancelled() => WaitOutcome::Cancelled,
    }
}

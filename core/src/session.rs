//! # Device Session
//!
//! The state machine between discovery and adb.
//!
//! A session starts [`Idle`](SessionState::Idle). The first resolved advertisement moves it to
//! [`AwaitingAction`](SessionState::AwaitingAction) and runs the flow selected by [`Mode`].
//! Any terminal outcome (connect success or failure, pairing failure, interrupt) moves it to
//! [`Done`](SessionState::Done), marks the shared [`Completion`] and releases discovery.
//! States are only ever entered in that order.
//!
//! The session is a single consumer of [`DiscoveryEvent`]s and owns the prompt, so its
//! state is only ever touched from one task.

use std::sync::Arc;

use adbwifi_common::config::Config;
use adbwifi_common::device::{Mode, ResolvedEndpoint, ServiceAdvertisement};
use adbwifi_common::{error, info, progress, success};
use adbwifi_protocols::adb;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::completion::Completion;
use crate::discovery::{DiscoveryControl, DiscoveryEvent};
use crate::invoker::Invoker;
use crate::prompt::{Prompt, PromptOutcome};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingAction { endpoint: ResolvedEndpoint },
    Done { outcome: SessionOutcome },
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Connected,
    ConnectFailed,
    PairingFailed,
    Cancelled,
    /// The mDNS event stream ended before any outcome was reached.
    DiscoveryClosed,
}

type DeviceFoundHook = Box<dyn Fn(&ResolvedEndpoint) + Send + Sync>;

pub struct DeviceSession {
    mode: Mode,
    config: Arc<Config>,
    invoker: Arc<dyn Invoker>,
    prompt: Arc<dyn Prompt>,
    discovery: Arc<dyn DiscoveryControl>,
    completion: Arc<Completion>,
    interrupt: CancellationToken,
    state: SessionState,
    device_address: Option<String>,
    on_device_found: Option<DeviceFoundHook>,
}

impl DeviceSession {
    pub fn new(
        mode: Mode,
        config: Arc<Config>,
        invoker: Arc<dyn Invoker>,
        prompt: Arc<dyn Prompt>,
        discovery: Arc<dyn DiscoveryControl>,
    ) -> Self {
        Self {
            mode,
            config,
            invoker,
            prompt,
            discovery,
            completion: Arc::new(Completion::new()),
            interrupt: CancellationToken::new(),
            state: SessionState::Idle,
            device_address: None,
            on_device_found: None,
        }
    }

    /// Called once, right before the session starts acting on a device.
    pub fn with_on_device_found(mut self, hook: impl Fn(&ResolvedEndpoint) + Send + Sync + 'static) -> Self {
        self.on_device_found = Some(Box::new(hook));
        self
    }

    /// The flag marked when the session reaches a terminal outcome.
    pub fn completion(&self) -> Arc<Completion> {
        self.completion.clone()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn device_address(&self) -> Option<&str> {
        self.device_address.as_deref()
    }

    pub fn is_done(&self) -> bool {
        self.completion.is_done()
    }

    /// Consumes discovery events until the session is done.
    ///
    /// Also ends the session if `cancel` fires while waiting for a device, or if the
    /// event stream closes.
    pub async fn run(
        mut self,
        mut events: UnboundedReceiver<DiscoveryEvent>,
        cancel: CancellationToken,
    ) -> SessionOutcome {
        self.interrupt = cancel.clone();
        loop {
            if let SessionState::Done { outcome } = self.state {
                return outcome;
            }
            if self.completion.is_done() {
                return self.finish(SessionOutcome::Cancelled);
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return self.finish(SessionOutcome::Cancelled);
                }
                event = events.recv() => match event {
                    Some(event) => self.handle(event).await,
                    None => {
                        warn!("discovery stopped before a device was handled");
                        return self.finish(SessionOutcome::DiscoveryClosed);
                    }
                },
            }
        }
    }

    /// Applies a single discovery event.
    pub async fn handle(&mut self, event: DiscoveryEvent) {
        match event {
            DiscoveryEvent::Resolved(advertisement) => self.on_service_added(advertisement).await,
            DiscoveryEvent::Removed { fullname } => {
                debug!(%fullname, "service removed");
            }
        }
    }

    async fn on_service_added(&mut self, advertisement: ServiceAdvertisement) {
        if self.state != SessionState::Idle {
            debug!(
                fullname = %advertisement.fullname,
                "ignoring advertisement, a device is already being handled"
            );
            return;
        }

        let endpoint = ResolvedEndpoint::resolve(&advertisement);
        if let Some(hook) = &self.on_device_found {
            hook(&endpoint);
        }

        info!("Device found: {}", advertisement.hostname);
        if endpoint.is_numeric() {
            info!("IP Address: {}", endpoint.address);
        }

        self.device_address = Some(endpoint.address.clone());
        self.state = SessionState::AwaitingAction {
            endpoint: endpoint.clone(),
        };

        let outcome = match self.mode {
            Mode::PairThenConnect => self.pair_then_connect(&endpoint).await,
            Mode::ConnectOnly => self.connect(&endpoint.address).await,
        };
        self.finish(outcome);
    }

    async fn pair_then_connect(&self, endpoint: &ResolvedEndpoint) -> SessionOutcome {
        progress!("Pairing...");
        let paired = self.invoker.run(&adb::pair(&self.config, endpoint)).await;

        if self.interrupted() {
            return SessionOutcome::Cancelled;
        }
        if !paired {
            error!("Pairing failed");
            return SessionOutcome::PairingFailed;
        }

        success!("Paired successfully");
        info!("Ready to connect to: {}", endpoint.address);
        self.connect(&endpoint.address).await
    }

    async fn connect(&self, address: &str) -> SessionOutcome {
        if self.interrupted() {
            return SessionOutcome::Cancelled;
        }

        let port = match self.prompt.port(&self.config.default_connect_port).await {
            PromptOutcome::Port(port) => port,
            PromptOutcome::Cancelled => return SessionOutcome::Cancelled,
        };

        progress!("Connecting to {}...", adb::host_port(address, &port));
        let connected = self.invoker.run(&adb::connect(&self.config, address, &port)).await;

        if self.interrupted() {
            return SessionOutcome::Cancelled;
        }
        if connected {
            success!("Connected successfully");
            SessionOutcome::Connected
        } else {
            error!("Connection failed");
            SessionOutcome::ConnectFailed
        }
    }

    /// An interrupted adb child exits non-zero; that is a cancellation, not a tool failure.
    fn interrupted(&self) -> bool {
        self.interrupt.is_cancelled() || self.completion.is_done()
    }

    /// Enters `Done`: marks completion and releases discovery.
    ///
    /// The cancellation notice is printed only by whoever marks completion first, so a
    /// concurrent interrupt handler and the session never both report it.
    fn finish(&mut self, outcome: SessionOutcome) -> SessionOutcome {
        let first = self.completion.mark();
        self.discovery.release();

        if first && outcome == SessionOutcome::Cancelled {
            error!("Cancelled");
        }

        debug!(?outcome, "session done");
        self.state = SessionState::Done { outcome };
        outcome
    }
}

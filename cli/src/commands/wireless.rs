use std::sync::Arc;

use adbwifi_common::config::Config;
use adbwifi_common::device::Mode;
use adbwifi_core::discovery::DiscoverySession;
use adbwifi_core::foreground::{self, DeviceListing};
use adbwifi_core::invoker::{Invoker, ProcessInvoker};
use adbwifi_core::prompt::LinePrompt;
use adbwifi_core::session::DeviceSession;
use adbwifi_protocols::adb;
use adbwifi_protocols::qr::pairing_payload;
use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::terminal::{print, qr, spinner};

/// Shows the pairing QR code, waits for a device and pairs and/or connects to it.
///
/// Connected devices are listed on the way out, whatever happened before.
pub async fn run(mode: Mode, cfg: Config) -> anyhow::Result<()> {
    let cfg = Arc::new(cfg);
    let invoker: Arc<dyn Invoker> = Arc::new(ProcessInvoker);
    let _listing = DeviceListing::new(invoker.clone(), adb::devices(&cfg)).with_preamble(|| {
        spinner::stop();
        crate::mprint!();
    });

    let cancel = CancellationToken::new();
    watch_interrupt(cancel.clone());

    print::banner();
    qr::display(&pairing_payload(&cfg))?;
    print::mode_instructions(mode);

    let (discovery, events) =
        DiscoverySession::start(&cfg.service_type).context("could not start device discovery")?;

    let prompt = LinePrompt::stdin(cancel.clone(), cfg.prompt_delay);
    let session = DeviceSession::new(
        mode,
        cfg.clone(),
        invoker,
        Arc::new(prompt),
        discovery.clone(),
    )
    .with_on_device_found(|_| spinner::stop());

    print::waiting_hint();
    crate::mprint!();
    spinner::start_waiting("Waiting for device...");

    let driven = foreground::drive(session, events, discovery, cancel).await;
    debug!(?driven, "foreground finished");

    Ok(())
}

fn watch_interrupt(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                debug!("interrupt received");
                cancel.cancel();
            }
            Err(e) => warn!("unable to listen for Ctrl+C: {e}"),
        }
    });
}

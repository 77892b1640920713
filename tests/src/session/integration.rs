#![cfg(test)]
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use adbwifi_common::device::Mode;
use adbwifi_core::discovery::{DiscoveryControl, DiscoveryEvent, WaitOutcome};
use adbwifi_core::prompt::{Prompt, PromptOutcome};
use adbwifi_core::session::SessionOutcome;
use tokio_util::sync::CancellationToken;

use crate::support::{self, Harness, ScriptedInvoker, ScriptedPrompt};

const PHONE: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10));

/// Pair succeeds, the operator accepts the default port, connect succeeds.
#[tokio::test]
async fn pair_connect_success() {
    let invoker = ScriptedInvoker::new([true, true]);
    let mut harness = Harness::new(Mode::PairThenConnect, invoker, |c| support::typed("\n", c));

    harness.announce(support::advertisement("Android.local.", &[PHONE], 37000));
    let finished = harness.drive().await;

    assert_eq!(finished.outcome, SessionOutcome::Connected);
    assert_eq!(finished.wait, WaitOutcome::Completed);
    assert!(finished.done, "session should be done after connecting");
    assert_eq!(
        harness.invoker.commands(),
        vec![
            "adb pair 192.168.1.10:37000 123456",
            "adb connect 192.168.1.10:5555",
            "adb devices -l",
        ]
    );
    assert_eq!(harness.discovery.shutdowns(), 1);

    // Releasing again must be harmless.
    harness.discovery.release();
    assert_eq!(harness.discovery.shutdowns(), 1);
}

/// No addresses advertised: the hostname is used, and a failed connect still ends the session.
#[tokio::test]
async fn connect_only_failure_uses_hostname() {
    let invoker = ScriptedInvoker::new([false]);
    let mut harness = Harness::new(Mode::ConnectOnly, invoker, |c| support::typed("5555\n", c));

    harness.announce(support::advertisement("mydevice.local", &[], 41000));
    let finished = harness.drive().await;

    assert_eq!(finished.outcome, SessionOutcome::ConnectFailed);
    assert!(finished.done);
    assert_eq!(
        harness.invoker.commands(),
        vec!["adb connect mydevice.local:5555", "adb devices -l"]
    );
    assert_eq!(harness.discovery.shutdowns(), 1);
}

/// Ctrl+C while the port prompt waits for input.
#[tokio::test]
async fn interrupt_during_prompt() {
    let invoker = ScriptedInvoker::new([true]);
    let mut harness = Harness::new(Mode::PairThenConnect, invoker, support::stalled);

    harness.announce(support::advertisement("Android.local.", &[PHONE], 37000));

    let cancel = harness.cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();
    });

    let finished = harness.drive().await;

    assert_eq!(finished.outcome, SessionOutcome::Cancelled);
    assert!(finished.done);
    assert_eq!(harness.discovery.shutdowns(), 1, "discovery must shut down exactly once");
    assert!(harness.discovery.calls() >= 1);
    assert_eq!(
        harness.invoker.commands(),
        vec!["adb pair 192.168.1.10:37000 123456", "adb devices -l"],
        "no connect after cancellation, listing still runs"
    );
}

/// Ctrl+C while `adb pair` runs: the killed child is a cancellation, not a pairing failure.
#[tokio::test]
async fn interrupt_during_pairing() {
    let cancel = CancellationToken::new();
    let invoker = ScriptedInvoker::killed_by(&cancel);
    let mut harness = Harness::with_interrupt(
        Mode::PairThenConnect,
        invoker,
        |c| support::typed("\n", c),
        cancel.clone(),
    );

    harness.announce(support::advertisement("Android.local.", &[PHONE], 37000));
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    let finished = harness.drive().await;

    assert_eq!(finished.outcome, SessionOutcome::Cancelled);
    assert!(finished.done);
    assert_eq!(harness.discovery.shutdowns(), 1);
    assert_eq!(
        harness.invoker.commands(),
        vec!["adb pair 192.168.1.10:37000 123456", "adb devices -l"],
        "no connect after an interrupted pairing"
    );
}

/// Ctrl+C while `adb connect` runs.
#[tokio::test]
async fn interrupt_during_connect() {
    let cancel = CancellationToken::new();
    let invoker = ScriptedInvoker::killed_by(&cancel);
    let mut harness = Harness::with_interrupt(
        Mode::ConnectOnly,
        invoker,
        |c| support::typed("\n", c),
        cancel.clone(),
    );

    harness.announce(support::advertisement("Android.local.", &[PHONE], 37000));
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    let finished = harness.drive().await;

    assert_eq!(finished.outcome, SessionOutcome::Cancelled);
    assert_eq!(
        harness.invoker.commands(),
        vec!["adb connect 192.168.1.10:5555", "adb devices -l"]
    );
}

/// Ctrl+C before any device shows up.
#[tokio::test]
async fn interrupt_while_waiting_for_device() {
    let invoker = ScriptedInvoker::new([]);
    let mut harness = Harness::new(Mode::PairThenConnect, invoker, |c| support::typed("\n", c));
    harness.cancel.cancel();

    let finished = harness.drive().await;

    assert_eq!(finished.outcome, SessionOutcome::Cancelled);
    assert!(finished.done);
    assert_eq!(harness.invoker.commands(), vec!["adb devices -l"]);
    assert_eq!(harness.discovery.shutdowns(), 1);
}

#[tokio::test]
async fn pairing_failure_ends_session() {
    let invoker = ScriptedInvoker::new([false]);
    let prompt = ScriptedPrompt::new([]);
    let asked = prompt.clone();
    let mut harness = Harness::new(Mode::PairThenConnect, invoker, move |_: &CancellationToken| {
        prompt as Arc<dyn Prompt>
    });

    harness.announce(support::advertisement("Android.local.", &[PHONE], 37000));
    let finished = harness.drive().await;

    assert_eq!(finished.outcome, SessionOutcome::PairingFailed);
    assert_eq!(finished.wait, WaitOutcome::Completed);
    assert_eq!(asked.asked.load(Ordering::SeqCst), 0, "no port prompt after a failed pairing");
    assert_eq!(
        harness.invoker.commands(),
        vec!["adb pair 192.168.1.10:37000 123456", "adb devices -l"]
    );
    assert_eq!(harness.discovery.shutdowns(), 1);
}

#[tokio::test]
async fn later_devices_are_rejected() {
    let invoker = ScriptedInvoker::new([true]);
    let mut harness = Harness::new(Mode::ConnectOnly, invoker, |c| support::typed("7000\n", c));

    let other = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 11));
    harness.announce(support::advertisement("first.local.", &[PHONE], 37000));
    harness.announce(support::advertisement("second.local.", &[other], 37001));
    let finished = harness.drive().await;

    assert_eq!(finished.outcome, SessionOutcome::Connected);
    assert_eq!(
        harness.invoker.commands(),
        vec!["adb connect 192.168.1.10:7000", "adb devices -l"]
    );
}

#[tokio::test]
async fn operator_cancel_from_prompt_is_terminal() {
    let invoker = ScriptedInvoker::new([]);
    let prompt = ScriptedPrompt::new([PromptOutcome::Cancelled]);
    let mut harness = Harness::new(Mode::ConnectOnly, invoker, move |_: &CancellationToken| {
        prompt as Arc<dyn Prompt>
    });

    harness.announce(support::advertisement("Android.local.", &[PHONE], 37000));
    let finished = harness.drive().await;

    assert_eq!(finished.outcome, SessionOutcome::Cancelled);
    assert_eq!(finished.wait, WaitOutcome::Completed);
    assert_eq!(harness.invoker.commands(), vec!["adb devices -l"]);
    assert_eq!(harness.discovery.shutdowns(), 1);
}

#[tokio::test]
async fn removal_events_do_not_end_the_session() {
    let invoker = ScriptedInvoker::new([true]);
    let mut harness = Harness::new(Mode::ConnectOnly, invoker, |c| support::typed("\n", c));

    harness
        .events
        .send(DiscoveryEvent::Removed {
            fullname: "stale._adb-tls-pairing._tcp.local.".to_string(),
        })
        .unwrap();
    harness.announce(support::advertisement("Android.local.", &[PHONE], 37000));
    let finished = harness.drive().await;

    assert_eq!(finished.outcome, SessionOutcome::Connected);
    assert_eq!(
        harness.invoker.commands(),
        vec!["adb connect 192.168.1.10:5555", "adb devices -l"]
    );
}

#[tokio::test]
async fn closed_discovery_stream_ends_session() {
    let invoker = ScriptedInvoker::new([]);
    let mut harness = Harness::new(Mode::PairThenConnect, invoker, |c| support::typed("\n", c));

    let (replacement, _rx) = tokio::sync::mpsc::unbounded_channel();
    drop(std::mem::replace(&mut harness.events, replacement));

    let finished = harness.drive().await;

    assert_eq!(finished.outcome, SessionOutcome::DiscoveryClosed);
    assert!(finished.done);
    assert_eq!(harness.discovery.shutdowns(), 1);
}

#[tokio::test]
async fn ipv6_endpoint_is_bracketed() {
    let invoker = ScriptedInvoker::new([true, true]);
    let mut harness = Harness::new(Mode::PairThenConnect, invoker, |c| support::typed("\n", c));

    let v6 = IpAddr::V6(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1));
    harness.announce(support::advertisement("Android.local.", &[v6], 37000));
    harness.drive().await;

    assert_eq!(
        harness.invoker.commands(),
        vec![
            "adb pair [fe80::1]:37000 123456",
            "adb connect [fe80::1]:5555",
            "adb devices -l",
        ]
    );
}

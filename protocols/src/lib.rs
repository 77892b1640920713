//! Wire-level shapes: the adb command lines we build, the QR payload the phone scans,
//! and the translation of mDNS records into [`ServiceAdvertisement`]s.
//!
//! [`ServiceAdvertisement`]: adbwifi_common::device::ServiceAdvertisement

pub mod adb;
pub mod mdns;
pub mod qr;

//! # Device Model
//!
//! Types describing a device announced over mDNS and the endpoint derived from it.

use std::fmt;
use std::net::IpAddr;

/// The flow selected at startup. Never changes during a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Pair with the scanned device, then prompt for a port and connect.
    #[default]
    PairThenConnect,
    /// Skip pairing; only use the scanned address to connect.
    ConnectOnly,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::PairThenConnect => write!(f, "Pair & Connect"),
            Mode::ConnectOnly => write!(f, "Connect Only"),
        }
    }
}

/// A resolved service record as delivered by the discovery layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceAdvertisement {
    pub fullname: String,
    pub hostname: String,
    /// Raw addresses in discovery order. The first one is preferred.
    pub addresses: Vec<IpAddr>,
    pub port: u16,
}

/// Where to reach a discovered device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub address: String,
    pub port: u16,
}

impl ResolvedEndpoint {
    /// Derives the endpoint of an advertisement.
    ///
    /// Prefers the first numeric address and falls back to the hostname, with the
    /// trailing root label dot removed. Never fails.
    pub fn resolve(advertisement: &ServiceAdvertisement) -> Self {
        let address = match advertisement.addresses.first() {
            Some(ip) => ip.to_string(),
            None => advertisement.hostname.trim_end_matches('.').to_string(),
        };

        Self {
            address,
            port: advertisement.port,
        }
    }

    /// True when the address came from a numeric IP rather than a hostname.
    pub fn is_numeric(&self) -> bool {
        self.address.parse::<IpAddr>().is_ok()
    }
}

impl fmt::Display for ResolvedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

use thiserror::Error;

/// Errors raised while bringing up mDNS discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to start the mDNS daemon: {0}")]
    Daemon(#[source] mdns_sd::Error),

    #[error("failed to browse for {service_type}: {source}")]
    Browse {
        service_type: String,
        #[source]
        source: mdns_sd::Error,
    },
}

use std::net::IpAddr;

use adbwifi_common::device::ServiceAdvertisement;
use mdns_sd::ServiceInfo;

/// Converts a resolved mDNS record into an advertisement.
pub fn to_advertisement(info: &ServiceInfo) -> ServiceAdvertisement {
    advertisement_from_parts(
        info.get_fullname(),
        info.get_hostname(),
        info.get_addresses().iter().copied(),
        info.get_port(),
    )
}

/// Builds an advertisement with a stable address order.
///
/// mDNS hands addresses over as an unordered set; IPv4 sorts before IPv6 so the
/// preferred address does not change between runs.
pub fn advertisement_from_parts(
    fullname: &str,
    hostname: &str,
    addresses: impl IntoIterator<Item = IpAddr>,
    port: u16,
) -> ServiceAdvertisement {
    let mut addresses: Vec<IpAddr> = addresses.into_iter().collect();
    addresses.sort_by_key(|ip| (ip.is_ipv6(), *ip));
    addresses.dedup();

    ServiceAdvertisement {
        fullname: fullname.to_string(),
        hostname: hostname.to_string(),
        addresses,
        port,
    }
}

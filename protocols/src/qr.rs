use adbwifi_common::config::Config;

/// Text encoded in the pairing QR code: `WIFI:T:ADB;S:<name>;P:<password>;;`.
pub fn pairing_payload(cfg: &Config) -> String {
    format!("WIFI:T:ADB;S:{};P:{};;", cfg.qr_name, cfg.pairing_code)
}

use std::time::Duration;

/// Service type announced by devices that show the "pair device with QR code" screen.
pub const PAIRING_SERVICE_TYPE: &str = "_adb-tls-pairing._tcp.local.";

/// Runtime configuration shared by the session and the command builders.
///
/// Built once at startup and handed out explicitly; nothing reads it from global state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The mDNS service type to browse for.
    pub service_type: String,
    /// Network name encoded into the pairing QR code.
    pub qr_name: String,
    /// Pairing password encoded into the QR code and passed to `adb pair`.
    pub pairing_code: String,
    /// Port used for `adb connect` when the operator just presses enter.
    pub default_connect_port: String,
    /// Program invoked for pair, connect and device listing.
    pub adb_program: String,
    /// Pause before the port prompt so pending output settles first.
    pub prompt_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_type: PAIRING_SERVICE_TYPE.to_string(),
            qr_name: "debug".to_string(),
            pairing_code: "123456".to_string(),
            default_connect_port: "5555".to_string(),
            adb_program: "adb".to_string(),
            prompt_delay: Duration::from_millis(200),
        }
    }
}

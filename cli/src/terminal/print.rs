use adbwifi_common::device::Mode;
use adbwifi_common::output::PRINT_TARGET;
use colored::*;
use tracing::info;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 48;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

/// Writes a line without any status prefix.
pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn banner() {
    let text: ColoredString = " ADB Wireless Debug ".bold();
    let side: usize = TOTAL_WIDTH.saturating_sub(console::measure_text_width(&text)) / 2;
    let sep: ColoredString = "═".repeat(side).color(colors::SEPARATOR);

    print("");
    print(&format!("{sep}{text}{sep}"));
    print("");
}

pub fn mode_instructions(mode: Mode) {
    let (color, scan_step) = match mode {
        Mode::PairThenConnect => (colors::PAIR_MODE, "Scan QR code to pair new device"),
        Mode::ConnectOnly => (colors::CONNECT_MODE, "Scan QR code to detect device IP"),
    };

    print("");
    print(&format!("Mode: {mode}").color(color).to_string());
    print(&format!("1. {scan_step}").color(colors::TEXT_DEFAULT).to_string());
    print(&"2. Then enter port to connect".color(colors::TEXT_DEFAULT).to_string());
    print("");
    print(
        &"Path: Developer options > Wireless debugging > Pair device with QR code"
            .color(colors::HINT)
            .to_string(),
    );
    print("");
}

pub fn waiting_hint() {
    print(&"Waiting for device...".bold().to_string());
    print(&"(Press Ctrl+C to exit)".color(colors::HINT).to_string());
}

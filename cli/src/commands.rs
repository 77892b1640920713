pub mod wireless;

use adbwifi_common::device::Mode;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "adbwifi")]
#[command(about = "Pair and connect Android 11+ devices for wireless debugging.")]
#[command(
    after_help = "On the device: Developer options > Wireless debugging > Pair device with QR code"
)]
pub struct CommandLine {
    /// Scan QR code to pair, then connect (default)
    #[arg(short = 'p', long = "pair-connect", conflicts_with = "connect")]
    pub pair_connect: bool,

    /// Scan QR code to get the device IP, then connect (for paired devices)
    #[arg(short = 'c', long = "connect")]
    pub connect: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn mode(&self) -> Mode {
        if self.connect {
            Mode::ConnectOnly
        } else {
            Mode::PairThenConnect
        }
    }
}

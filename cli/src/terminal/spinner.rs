use std::io::{self, Write};
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const TIP_DURATION: Duration = Duration::from_secs(3);
const TICK: Duration = Duration::from_millis(100);
const TIPS: &[&str] = &[
    "Press Ctrl+C to exit",
    "Developer options > Wireless debugging > Pair device with QR code",
];

static SPINNER: OnceLock<ProgressBar> = OnceLock::new();

fn init_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb.enable_steady_tick(TICK);
    pb
}

/// Shows the waiting spinner, cycling through tips until [`stop`] is called.
pub fn start_waiting(message: &str) {
    let pb = SPINNER.get_or_init(init_spinner).clone();
    let message = message.to_string();

    thread::spawn(move || {
        let mut tip_index = 0;
        while !pb.is_finished() {
            let tip = TIPS[tip_index % TIPS.len()];
            pb.set_message(format!("{} {}", message, tip.italic().bright_black()));
            tip_index += 1;

            let mut waited = Duration::ZERO;
            while waited < TIP_DURATION && !pb.is_finished() {
                thread::sleep(TICK);
                waited += TICK;
            }
        }
    });
}

/// Clears the spinner for good. Safe to call when it never started.
pub fn stop() {
    if let Some(pb) = SPINNER.get()
        && !pb.is_finished()
    {
        pb.finish_and_clear();
    }
}

/// Log writer that keeps the spinner line intact while printing above it.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match SPINNER.get() {
            Some(pb) => pb.suspend(|| io::stdout().write_all(buf))?,
            None => io::stdout().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

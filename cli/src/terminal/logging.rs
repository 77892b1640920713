use adbwifi_common::output::{ERROR_TARGET, INFO_TARGET, PRINT_TARGET, PROGRESS_TARGET, SUCCESS_TARGET};
use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::spinner::SpinnerWriter;

/// Operator output is on; diagnostics from dependencies only when they matter.
const FILTER: &str = "warn,adbwifi=info";

pub struct AdbWifiFormatter;

impl<S, N> FormatEvent<S, N> for AdbWifiFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if let Some(symbol) = status_symbol(meta.target()) {
            if !symbol.is_empty() {
                write!(writer, "{symbol} ")?;
            }
        } else {
            let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
                Level::TRACE => ("[ ]", |s| s.dimmed()),
                Level::DEBUG => ("[?]", |s| s.blue()),
                Level::INFO => ("[+]", |s| s.green().bold()),
                Level::WARN => ("[*]", |s| s.yellow().bold()),
                Level::ERROR => ("[-]", |s| s.red().bold()),
            };
            write!(writer, "{} ", color_func(symbol.into()))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Prefix for operator status targets, `None` for ordinary diagnostics.
fn status_symbol(target: &str) -> Option<ColoredString> {
    match target {
        PRINT_TARGET => Some("".normal()),
        INFO_TARGET => Some("•".blue()),
        PROGRESS_TARGET => Some("…".yellow()),
        SUCCESS_TARGET => Some("✓".green().bold()),
        ERROR_TARGET => Some("✗".red().bold()),
        _ => None,
    }
}

pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(FILTER))
        .event_format(AdbWifiFormatter)
        .with_writer(|| SpinnerWriter)
        .try_init();
}

//! Operator-facing status lines.
//!
//! Each macro colors its message and emits a `tracing` event on a dedicated target,
//! so the terminal formatter can prefix it with the matching symbol. Diagnostics
//! should keep using `tracing::debug!` and friends directly.

pub const PRINT_TARGET: &str = "adbwifi::print";
pub const INFO_TARGET: &str = "adbwifi::info";
pub const PROGRESS_TARGET: &str = "adbwifi::progress";
pub const SUCCESS_TARGET: &str = "adbwifi::success";
pub const ERROR_TARGET: &str = "adbwifi::error";

/// Neutral information, such as a discovered device.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__private::tracing::info!(
            target: $crate::output::INFO_TARGET,
            "{}",
            $crate::__private::colored::Colorize::blue(format!($($arg)*).as_str())
        )
    };
}

/// A step that is about to start.
#[macro_export]
macro_rules! progress {
    ($($arg:tt)*) => {
        $crate::__private::tracing::info!(
            target: $crate::output::PROGRESS_TARGET,
            "{}",
            $crate::__private::colored::Colorize::yellow(format!($($arg)*).as_str())
        )
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__private::tracing::info!(
            target: $crate::output::SUCCESS_TARGET,
            "{}",
            $crate::__private::colored::Colorize::green(format!($($arg)*).as_str())
        )
    };
}

/// A failed step. Logged at info level: failures of external tools are expected outcomes.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__private::tracing::info!(
            target: $crate::output::ERROR_TARGET,
            "{}",
            $crate::__private::colored::Colorize::red(format!($($arg)*).as_str())
        )
    };
}

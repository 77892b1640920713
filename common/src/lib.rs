//! Shared models and configuration for the `adbwifi` workspace.
//!
//! * [`config`]: the immutable runtime configuration.
//! * [`device`]: discovery records, the selected [`device::Mode`] and endpoint resolution.
//! * [`output`]: operator-facing status macros routed through `tracing`.

pub mod config;
pub mod device;
pub mod output;

#[doc(hidden)]
pub mod __private {
    pub use colored;
    pub use tracing;
}

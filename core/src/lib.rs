//! # adbwifi core
//!
//! The discovery-to-action state machine.
//!
//! * [`discovery`]: owns the mDNS browse and the foreground wait.
//! * [`session`]: reacts to discovered devices and drives pair/connect.
//! * [`invoker`] and [`prompt`]: the two seams to the outside world (subprocesses and the operator).
//! * [`foreground`]: waits for the session, handles interrupts and lists devices on exit.
//! * [`completion`]: the shared, set-once "done" flag.

pub mod completion;
pub mod discovery;
pub mod error;
pub mod foreground;
pub mod invoker;
pub mod prompt;
pub mod session;

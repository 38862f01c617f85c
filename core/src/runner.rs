//! Adapters for the [`CommandRunner`](netzap_common::runner::CommandRunner) port.
//!
//! The host picks one at construction time:
//! * [`ProcessRunner`] spawns the real binary.
//! * [`UnavailableRunner`] stands in where processes cannot be spawned at all.

mod process;
mod unavailable;

pub use process::ProcessRunner;
pub use unavailable::{UNAVAILABLE_MESSAGE, UnavailableRunner};

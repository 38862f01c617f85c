//! # netzap common
//!
//! Shared models for driving the ZMap scanner from Rust.
//!
//! * **[`scan`]**: the typed scan configuration, option table, parsed records and probe payloads.
//! * **[`network`]**: target parsing and host-count estimation.
//! * **[`runner`]**: the port through which the core talks to the outside world (process execution).
//! * **[`error`]**: the error type shared by every crate in the workspace.
//! * **[`config`]**: runtime settings of the host application.

pub mod config;
pub mod error;
pub mod network;
pub mod runner;
pub mod scan;
pub mod utils;

pub use error::ZMapError;

//! # netzap core
//!
//! Turns a [`ScanConfig`](netzap_common::scan::ScanConfig) into a ZMap
//! invocation and ZMap's output back into records.
//!
//! * **[`command`]**: configuration → ordered argument vector.
//! * **[`parser`]**: raw stdout → [`ScanRecord`](netzap_common::scan::ScanRecord)s.
//! * **[`runner`]**: adapters for the [`CommandRunner`](netzap_common::runner::CommandRunner) port.
//! * **[`zmap`]**: the [`ZMap`] facade callers configure and execute.
//! * **[`service`]**: one complete scan request, from availability probe to summary.

pub mod command;
pub mod parser;
pub mod runner;
pub mod service;
pub mod zmap;

pub use zmap::ZMap;

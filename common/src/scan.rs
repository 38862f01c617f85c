//! # Scan Model
//!
//! Everything needed to describe a ZMap run and read its results back:
//!
//! * [`option::ScanOption`]: the closed set of options, each with its flag spelling and value kind.
//! * [`value::OptionValue`]: a single option value.
//! * [`config::ScanConfig`]: an insertion-ordered set of options with a shallow merge.
//! * [`record::ScanRecord`]: one parsed output row.
//! * [`probe`]: UDP probe payload formatting.
//! * [`scan_type::ScanType`]: the probe modules shipped with ZMap.

pub mod config;
pub mod option;
pub mod probe;
pub mod record;
pub mod scan_type;
pub mod value;

pub use config::ScanConfig;
pub use option::{ScanOption, ValueKind};
pub use probe::{ProbeArgKind, TemplateField};
pub use record::ScanRecord;
pub use scan_type::ScanType;
pub use value::OptionValue;

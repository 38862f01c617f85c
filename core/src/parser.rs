//! # Output Parser
//!
//! Reads ZMap's line-oriented stdout back into [`ScanRecord`]s.
//!
//! The primary format is CSV-like: `saddr,classification[,dport]`, optionally
//! preceded by `#` comment lines. Parsing is best effort and never fails;
//! blank lines, comments and rows with fewer than two columns are dropped.
//! An empty result therefore cannot tell "no host answered" apart from
//! "output was malformed", which is what [`ParsePolicy::BareAddressFallback`]
//! partially recovers from.

use netzap_common::scan::ScanRecord;
use netzap_common::scan::record::CLASSIFICATION_SYNACK;

/// How raw output is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Delimited rows only.
    #[default]
    Strict,
    /// Delimited rows; if none are found in non-blank output, read every
    /// line as a bare address (quiet or field-restricted output modes).
    BareAddressFallback { default_port: u16 },
}

pub fn parse(raw: &str) -> Vec<ScanRecord> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    raw.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<ScanRecord> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let mut fields = trimmed.split(',').map(str::trim);
    let saddr = fields.next()?;
    let classification = fields.next()?;
    let dport = fields.next().map(str::to_string);

    Some(ScanRecord::new(saddr, classification, dport))
}

/// One `synack` record per non-blank line, with `default_port` as `dport`.
pub fn parse_bare_addresses(raw: &str, default_port: u16) -> Vec<ScanRecord> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|addr| {
            ScanRecord::new(addr, CLASSIFICATION_SYNACK, Some(default_port.to_string()))
        })
        .collect()
}

pub fn parse_with(raw: &str, policy: ParsePolicy) -> Vec<ScanRecord> {
    let records = parse(raw);

    match policy {
        ParsePolicy::BareAddressFallback { default_port }
            if records.is_empty() && !raw.trim().is_empty() =>
        {
            parse_bare_addresses(raw, default_port)
        }
        _ => records,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

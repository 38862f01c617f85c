//! # Scan Target Model
//!
//! Classifies the positional targets handed to ZMap, so a summary can report
//! how many addresses a scan covered.
//!
//! A target can be:
//! * A single IP address (host).
//! * An IPv4 CIDR block (e.g., `192.168.1.0/24`).
//! * Anything else ZMap may accept (IPv6 blocks, names), counted as one host.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::network::range::{self, Ipv4Range};

/// Represents a distinct target to be scanned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// A single specific host.
    Host { target_addr: IpAddr },
    /// An IPv4 CIDR block.
    Network { ipv4_range: Ipv4Range, prefix: u8 },
    /// Passed through untouched.
    Other { spec: String },
}

impl Target {
    /// Never fails: unrecognised input becomes [`Target::Other`].
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if let Ok(target_addr) = s.parse::<IpAddr>() {
            return Target::Host { target_addr };
        }
        if let Some(target) = parse_cidr_range(s) {
            return target;
        }
        Target::Other {
            spec: s.to_string(),
        }
    }

    /// Addresses covered by this target.
    pub fn host_count(&self) -> u64 {
        match self {
            Target::Network { ipv4_range, .. } => ipv4_range.len(),
            Target::Host { .. } | Target::Other { .. } => 1,
        }
    }
}

impl FromStr for Target {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Target::parse(s))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Host { target_addr } => write!(f, "{target_addr}"),
            Target::Network { ipv4_range, prefix } => {
                write!(f, "{}/{prefix}", ipv4_range.start_addr)
            }
            Target::Other { spec } => f.write_str(spec),
        }
    }
}

/// Splits a whitespace-separated target string into its parts.
pub fn split_targets(subnets: &str) -> Vec<Target> {
    subnets.split_whitespace().map(Target::parse).collect()
}

/// Estimated number of addresses a scan of `subnets` covers. Never below one.
pub fn estimate_host_count(subnets: &str) -> u64 {
    split_targets(subnets)
        .iter()
        .map(Target::host_count)
        .fold(0u64, u64::saturating_add)
        .max(1)
}

/// Parses CIDR notation like "192.168.1.0/24".
fn parse_cidr_range(s: &str) -> Option<Target> {
    let (ip_str, prefix_str) = s.split_once('/')?;
    let ipv4_addr = ip_str.parse::<Ipv4Addr>().ok()?;
    let prefix = prefix_str.parse::<u8>().ok()?;
    let ipv4_range = range::cidr_range(ipv4_addr, prefix).ok()?;
    Some(Target::Network { ipv4_range, prefix })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

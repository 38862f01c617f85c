use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ZMapError;
use crate::scan::value::OptionValue;

/// Probe modules shipped with ZMap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanType {
    TcpSyn,
    IcmpEcho,
    Udp,
    TcpSynAck,
    TcpAck,
    TcpCustom,
    Arp,
    Ipv6TcpSyn,
    Ipv6IcmpEcho,
}

impl ScanType {
    /// The `--probe-module` name.
    pub fn module_name(self) -> &'static str {
        match self {
            ScanType::TcpSyn => "tcp_synscan",
            ScanType::IcmpEcho => "icmp_echoscan",
            ScanType::Udp => "udp",
            ScanType::TcpSynAck => "tcp_synack",
            ScanType::TcpAck => "tcp_ack",
            ScanType::TcpCustom => "tcp",
            ScanType::Arp => "arp",
            ScanType::Ipv6TcpSyn => "ipv6_tcp_syn",
            ScanType::Ipv6IcmpEcho => "ipv6_icmp_echo",
        }
    }

    /// Whether the module probes a port (and therefore needs `--target-port`).
    pub fn uses_port(self) -> bool {
        !matches!(self, ScanType::IcmpEcho | ScanType::Ipv6IcmpEcho | ScanType::Arp)
    }

    /// Transport label reported for results of this module.
    pub fn protocol(self) -> &'static str {
        match self {
            ScanType::IcmpEcho | ScanType::Ipv6IcmpEcho => "icmp",
            ScanType::Udp => "udp",
            ScanType::Arp => "arp",
            _ => "tcp",
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.module_name())
    }
}

impl FromStr for ScanType {
    type Err = ZMapError;

    /// Accepts module names plus the short `icmp_echo` alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp_synscan" => Ok(ScanType::TcpSyn),
            "icmp_echoscan" | "icmp_echo" => Ok(ScanType::IcmpEcho),
            "udp" => Ok(ScanType::Udp),
            "tcp_synack" => Ok(ScanType::TcpSynAck),
            "tcp_ack" => Ok(ScanType::TcpAck),
            "tcp" => Ok(ScanType::TcpCustom),
            "arp" => Ok(ScanType::Arp),
            "ipv6_tcp_syn" => Ok(ScanType::Ipv6TcpSyn),
            "ipv6_icmp_echo" => Ok(ScanType::Ipv6IcmpEcho),
            other => Err(ZMapError::config(format!("Unsupported scan type: {other}"))),
        }
    }
}

impl Serialize for ScanType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.module_name())
    }
}

impl<'de> Deserialize<'de> for ScanType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl From<ScanType> for OptionValue {
    fn from(value: ScanType) -> Self {
        OptionValue::Text(value.module_name().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_alias() {
        assert_eq!("tcp_synscan".parse::<ScanType>().unwrap(), ScanType::TcpSyn);
        assert_eq!("icmp_echo".parse::<ScanType>().unwrap(), ScanType::IcmpEcho);
        assert_eq!(ScanType::IcmpEcho.to_string(), "icmp_echoscan");
        assert!("smtp".parse::<ScanType>().is_err());
    }

    #[test]
    fn serde_uses_module_names() {
        let parsed: ScanType = serde_json::from_str(r#""icmp_echo""#).unwrap();
        assert_eq!(parsed, ScanType::IcmpEcho);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#""icmp_echoscan""#);
    }

    #[test]
    fn protocol_labels() {
        assert_eq!(ScanType::IcmpEcho.protocol(), "icmp");
        assert_eq!(ScanType::TcpSyn.protocol(), "tcp");
        assert!(!ScanType::IcmpEcho.uses_port());
        assert!(ScanType::Udp.uses_port());
    }
}

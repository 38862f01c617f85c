use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::{Result, ZMapError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Number of addresses in the range, inclusive. An inverted range is empty.
    pub fn len(&self) -> u64 {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        if end < start {
            0
        } else {
            u64::from(end - start) + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn cidr_range(ip: Ipv4Addr, prefix: u8) -> Result<Ipv4Range> {
    let network = Ipv4Network::new(ip, prefix).map_err(|e| ZMapError::config(e.to_string()))?;
    Ok(Ipv4Range::new(network.network(), network.broadcast()))
}

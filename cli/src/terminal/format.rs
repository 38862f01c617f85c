use std::net::IpAddr;

use colored::*;
use netzap_core::service::{HostResult, HostStatus};

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn host_to_details(host: &HostResult) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![ip_to_detail(&host.ip)];

    if host.protocol != "icmp" {
        details.push(("Port".to_string(), host.port.to_string().color(colors::PORT)));
    }
    details.push(("Proto".to_string(), host.protocol.normal()));
    details.push(("Status".to_string(), status_to_colored(host.status)));
    details
}

fn ip_to_detail(ip: &str) -> Detail {
    match ip.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => ("IPv4".to_string(), ip.color(colors::IPV4_ADDR)),
        Ok(IpAddr::V6(_)) => ("IPv6".to_string(), ip.color(colors::IPV6_ADDR)),
        Err(_) => ("Addr".to_string(), ip.normal()),
    }
}

fn status_to_colored(status: HostStatus) -> ColoredString {
    match status {
        HostStatus::Open => "open".color(colors::OPEN).bold(),
        HostStatus::Closed => "closed".color(colors::CLOSED),
    }
}

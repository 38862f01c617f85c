//! # Scan Service
//!
//! One-shot scan orchestration on top of [`ZMap`]: validate a
//! [`ScanRequest`], check the binary is present, apply the preset for the
//! requested probe module, run it and turn the output into a [`ScanReport`].
//!
//! Unlike [`ZMap::execute_and_parse`], the service reads bare-address output
//! as open hosts on the requested port.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use netzap_common::config::Config;
use netzap_common::error::{Result, ZMapError};
use netzap_common::network::target;
use netzap_common::runner::CommandRunner;
use netzap_common::scan::{OptionValue, ScanConfig, ScanOption, ScanRecord, ScanType};

use crate::command::CommandInvocation;
use crate::parser::{self, ParsePolicy};
use crate::zmap::{self, ZMap};

pub const DEFAULT_PORT: u16 = 80;

/// Payload sent by UDP scans that do not set `probeArgs` themselves.
pub const DEFAULT_UDP_PROBE_ARGS: &str = r#"text "\0""#;

const NOT_INSTALLED: &str = "ZMap is not installed or not found in PATH. \
    Please install ZMap on your system. Visit https://github.com/zmap/zmap for installation instructions.";

/// A scan as submitted by a caller, e.g. a JSON request body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub subnet: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_scan_type")]
    pub scan_type: ScanType,
    /// Merged over the preset; these keys win.
    #[serde(default)]
    pub options: ScanConfig,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_scan_type() -> ScanType {
    ScanType::TcpSyn
}

impl ScanRequest {
    pub fn new(subnet: impl Into<String>) -> Self {
        Self {
            subnet: subnet.into(),
            port: DEFAULT_PORT,
            scan_type: ScanType::TcpSyn,
            options: ScanConfig::new(),
        }
    }

    /// Preset keys first (`probeModule`, `targetPort` when the module
    /// probes a port, `subnet`), then the request options on top.
    pub fn to_config(&self) -> ScanConfig {
        let mut preset = ScanConfig::new().with(ScanOption::ProbeModule, self.scan_type);
        if self.scan_type.uses_port() {
            preset.insert(ScanOption::TargetPort, self.port);
        }
        preset.insert(ScanOption::Subnet, self.subnet.trim());

        let mut options = self.options.clone();
        if self.scan_type == ScanType::Udp && !options.contains(ScanOption::ProbeArgs) {
            options.insert(ScanOption::ProbeArgs, DEFAULT_UDP_PROBE_ARGS);
        }

        preset.merge(&options)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostStatus {
    Open,
    Closed,
}

/// A record as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostResult {
    pub ip: String,
    pub port: u16,
    pub protocol: &'static str,
    pub status: HostStatus,
}

impl HostResult {
    pub fn from_record(record: &ScanRecord, default_port: u16, scan_type: ScanType) -> Self {
        Self {
            ip: record.saddr.clone(),
            port: record.port_or(default_port),
            protocol: scan_type.protocol(),
            status: if record.is_open() {
                HostStatus::Open
            } else {
                HostStatus::Closed
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    /// Addresses covered by the targets, estimated from their prefixes.
    pub hosts_scanned: u64,
    /// Records returned by the scan.
    pub hosts_up: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub command: CommandInvocation,
    pub records: Vec<ScanRecord>,
    pub hosts: Vec<HostResult>,
    pub summary: ScanSummary,
    pub raw_output: String,
}

pub struct ScanService {
    runner: Arc<dyn CommandRunner>,
    config: Config,
}

impl ScanService {
    pub fn new(runner: Arc<dyn CommandRunner>, config: Config) -> Self {
        Self { runner, config }
    }

    /// A facade for `config`'s executable, unconfigured.
    pub fn zmap(&self) -> ZMap {
        ZMap::new(self.runner.clone()).set_executable_path(self.config.zmap_path.clone())
    }

    /// The facade [`ScanService::run`] would execute for `request`.
    pub fn prepare(&self, request: &ScanRequest) -> Result<ZMap> {
        if request.subnet.trim().is_empty() {
            return Err(ZMapError::config("Target subnet is required"));
        }
        request.options.validate()?;
        Ok(self.zmap().set_config(request.to_config()))
    }

    pub async fn run(&self, request: &ScanRequest) -> Result<ScanReport> {
        let zmap = self.prepare(request)?;

        if !zmap.is_available(self.config.probe_timeout).await {
            return Err(ZMapError::unavailable(NOT_INSTALLED));
        }

        let command = zmap.command();
        info!("Executing scan: {command}");

        let raw_output = zmap::check_execution(zmap.execute().await)?;
        let records = parser::parse_with(
            &raw_output,
            ParsePolicy::BareAddressFallback {
                default_port: request.port,
            },
        );
        debug!("{} record(s) parsed", records.len());

        Ok(build_report(command, request, records, raw_output))
    }
}

fn build_report(
    command: CommandInvocation,
    request: &ScanRequest,
    records: Vec<ScanRecord>,
    raw_output: String,
) -> ScanReport {
    let hosts: Vec<HostResult> = records
        .iter()
        .map(|r| HostResult::from_record(r, request.port, request.scan_type))
        .collect();

    let summary = ScanSummary {
        hosts_scanned: target::estimate_host_count(&subnet_text(&request.options, &request.subnet)),
        hosts_up: hosts.len(),
    };

    ScanReport {
        command,
        records,
        hosts,
        summary,
        raw_output,
    }
}

/// The subnet(s) actually scanned; options may override the request field.
fn subnet_text(options: &ScanConfig, fallback: &str) -> String {
    match options.get(ScanOption::Subnet) {
        Some(OptionValue::List(subnets)) => subnets.join(" "),
        Some(value) => value.to_string(),
        None => fallback.to_string(),
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

//! # ZMap Facade
//!
//! [`ZMap`] accumulates a [`ScanConfig`] through chained setters and runs it
//! through an injected [`CommandRunner`].
//!
//! Every setter consumes the facade and returns it with the configuration
//! replaced by `previous.merge(partial)`, so a facade is never shared between
//! scans by accident. Clone it to branch a configuration.
//!
//! ```rust,no_run
//! # async fn demo() -> netzap_common::error::Result<()> {
//! use netzap_core::ZMap;
//!
//! let records = ZMap::local()
//!     .tcp_syn_scan(443, Default::default())
//!     .target("10.0.0.0/8")
//!     .set_rate(10_000)
//!     .set_max_runtime(60)
//!     .execute_and_parse()
//!     .await?;
//! # Ok(()) }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use netzap_common::config::DEFAULT_EXECUTABLE;
use netzap_common::error::{Result, ZMapError};
use netzap_common::runner::{CommandRunner, ExecutionResult, ExecutionStatus};
use netzap_common::scan::probe::{self, ProbeArgKind};
use netzap_common::scan::{OptionValue, ScanConfig, ScanOption, ScanRecord, ScanType};

use crate::command::CommandInvocation;
use crate::parser::{self, ParsePolicy};
use crate::runner::ProcessRunner;

mod introspection;

const EXECUTION_FAILED: &str = "Failed to execute ZMap scan";

#[derive(Clone)]
pub struct ZMap {
    config: ScanConfig,
    executable_path: String,
    runner: Arc<dyn CommandRunner>,
}

impl ZMap {
    /// Empty configuration, `zmap` from `PATH`, commands sent to `runner`.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self::with_config(ScanConfig::new(), runner)
    }

    pub fn with_config(config: ScanConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            config,
            executable_path: DEFAULT_EXECUTABLE.to_string(),
            runner,
        }
    }

    /// A facade that spawns the real binary.
    pub fn local() -> Self {
        Self::new(Arc::new(ProcessRunner))
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn executable_path(&self) -> &str {
        &self.executable_path
    }

    pub fn set_executable_path(mut self, path: impl Into<String>) -> Self {
        self.executable_path = path.into();
        self
    }

    /// Shallow-merges `partial` over the current configuration.
    pub fn set_config(mut self, partial: ScanConfig) -> Self {
        self.config = self.config.merge(&partial);
        self
    }

    fn set(self, option: ScanOption, value: impl Into<OptionValue>) -> Self {
        self.set_config(ScanConfig::new().with(option, value))
    }

    fn unset(mut self, option: ScanOption) -> Self {
        self.config = self.config.clone().without(option);
        self
    }

    // ── presets ──────────────────────────────────────────────

    /// TCP SYN scan of `target_port`. Keys in `options` win over the preset.
    pub fn tcp_syn_scan(self, target_port: u16, options: ScanConfig) -> Self {
        let preset = ScanConfig::new()
            .with(ScanOption::ProbeModule, ScanType::TcpSyn)
            .with(ScanOption::TargetPort, target_port);
        self.set_config(preset.merge(&options))
    }

    pub fn icmp_echo_scan(self, options: ScanConfig) -> Self {
        let preset = ScanConfig::new().with(ScanOption::ProbeModule, ScanType::IcmpEcho);
        self.set_config(preset.merge(&options))
    }

    /// UDP scan of `target_port` carrying a payload encoded as `kind`.
    pub fn udp_scan(
        self,
        target_port: u16,
        kind: ProbeArgKind,
        payload: &str,
        options: ScanConfig,
    ) -> Self {
        let preset = ScanConfig::new()
            .with(ScanOption::ProbeModule, ScanType::Udp)
            .with(ScanOption::TargetPort, target_port)
            .with(ScanOption::ProbeArgs, probe::format_probe_args(kind, payload));
        self.set_config(preset.merge(&options))
    }

    // ── targets ──────────────────────────────────────────────

    /// A single subnet (CIDR, address or anything ZMap accepts), emitted as one token.
    pub fn target(self, subnet: impl Into<String>) -> Self {
        self.set(ScanOption::Subnet, subnet.into())
    }

    /// Several subnets, each emitted as its own positional token.
    pub fn targets<I, S>(self, subnets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let subnets: Vec<String> = subnets.into_iter().map(Into::into).collect();
        self.set(ScanOption::Subnet, subnets)
    }

    pub fn set_target_port(self, port: u16) -> Self {
        self.set(ScanOption::TargetPort, port)
    }

    pub fn set_blacklist_file(self, path: impl Into<String>) -> Self {
        self.set(ScanOption::BlacklistFile, path.into())
    }

    pub fn set_whitelist_file(self, path: impl Into<String>) -> Self {
        self.set(ScanOption::WhitelistFile, path.into())
    }

    // ── rate and limits ──────────────────────────────────────

    /// Packets per second.
    pub fn set_rate(self, pps: u32) -> Self {
        self.set(ScanOption::Rate, pps)
    }

    /// Bandwidth cap with an optional G/M/K suffix.
    pub fn set_bandwidth(self, bps: impl Into<String>) -> Self {
        self.set(ScanOption::Bandwidth, bps.into())
    }

    /// A count or a percentage of the address space (`"10%"`).
    pub fn set_max_targets(self, max: impl Into<OptionValue>) -> Self {
        self.set(ScanOption::MaxTargets, max)
    }

    pub fn set_max_results(self, max: u32) -> Self {
        self.set(ScanOption::MaxResults, max)
    }

    /// Seconds.
    pub fn set_max_runtime(self, seconds: u32) -> Self {
        self.set(ScanOption::MaxRuntime, seconds)
    }

    pub fn set_probes(self, count: u32) -> Self {
        self.set(ScanOption::Probes, count)
    }

    /// Seconds to keep receiving after the last probe.
    pub fn set_cooldown_time(self, seconds: u32) -> Self {
        self.set(ScanOption::CooldownTime, seconds)
    }

    pub fn set_seed(self, seed: u64) -> Self {
        self.set(ScanOption::Seed, seed)
    }

    pub fn set_retries(self, count: u32) -> Self {
        self.set(ScanOption::Retries, count)
    }

    pub fn set_dry_run(self, enabled: bool) -> Self {
        self.set(ScanOption::DryRun, enabled)
    }

    /// `current` is zero-based.
    pub fn set_sharding(self, total: u32, current: u32) -> Self {
        self.set_config(
            ScanConfig::new()
                .with(ScanOption::ShardTotal, total)
                .with(ScanOption::ShardCurrent, current),
        )
    }

    // ── network ──────────────────────────────────────────────

    /// A port number or a range such as `"40000-50000"`.
    pub fn set_source_port(self, port: impl Into<OptionValue>) -> Self {
        self.set(ScanOption::SourcePort, port)
    }

    pub fn set_source_ip(self, ip: impl Into<String>) -> Self {
        self.set(ScanOption::SourceIp, ip.into())
    }

    pub fn set_interface(self, iface: impl Into<String>) -> Self {
        self.set(ScanOption::Interface, iface.into())
    }

    pub fn set_gateway_mac(self, mac: impl Into<String>) -> Self {
        self.set(ScanOption::GatewayMac, mac.into())
    }

    pub fn set_source_mac(self, mac: impl Into<String>) -> Self {
        self.set(ScanOption::SourceMac, mac.into())
    }

    /// Send IP packets instead of Ethernet frames.
    pub fn set_vpn_mode(self, enabled: bool) -> Self {
        self.set(ScanOption::VpnMode, enabled)
    }

    // ── probe and output ─────────────────────────────────────

    pub fn set_probe_module(self, module: impl Into<OptionValue>) -> Self {
        self.set(ScanOption::ProbeModule, module)
    }

    pub fn set_probe_args(self, args: impl Into<String>) -> Self {
        self.set(ScanOption::ProbeArgs, args.into())
    }

    pub fn set_output_file(self, path: impl Into<String>) -> Self {
        self.set(ScanOption::OutputFile, path.into())
    }

    /// A list of field names or a pre-joined `"saddr,dport"` string.
    pub fn set_output_fields(self, fields: impl Into<OptionValue>) -> Self {
        self.set(ScanOption::OutputFields, fields)
    }

    /// Passing `None` for `args` clears previously set module arguments.
    pub fn set_output_module(self, module: impl Into<String>, args: Option<&str>) -> Self {
        let this = self.set(ScanOption::OutputModule, module.into());
        match args {
            Some(args) => this.set(ScanOption::OutputModuleArgs, args),
            None => this.unset(ScanOption::OutputModuleArgs),
        }
    }

    pub fn set_output_filter(self, filter: impl Into<String>) -> Self {
        self.set(ScanOption::OutputFilter, filter.into())
    }

    // ── logging and metadata ─────────────────────────────────

    /// 0 (quiet) to 5 (most verbose).
    pub fn set_verbosity(self, level: u8) -> Self {
        self.set(ScanOption::Verbosity, level)
    }

    pub fn set_log_file(self, path: impl Into<String>) -> Self {
        self.set(ScanOption::LogFile, path.into())
    }

    pub fn set_log_directory(self, path: impl Into<String>) -> Self {
        self.set(ScanOption::LogDirectory, path.into())
    }

    pub fn set_metadata_file(self, path: impl Into<String>) -> Self {
        self.set(ScanOption::MetadataFile, path.into())
    }

    pub fn set_status_updates_file(self, path: impl Into<String>) -> Self {
        self.set(ScanOption::StatusUpdatesFile, path.into())
    }

    pub fn set_quiet(self, enabled: bool) -> Self {
        self.set(ScanOption::Quiet, enabled)
    }

    pub fn disable_syslog(self, disabled: bool) -> Self {
        self.set(ScanOption::DisableSyslog, disabled)
    }

    pub fn set_notes(self, notes: impl Into<String>) -> Self {
        self.set(ScanOption::Notes, notes.into())
    }

    /// A JSON value or an already serialized JSON string.
    pub fn set_user_metadata(self, metadata: impl Into<OptionValue>) -> Self {
        self.set(ScanOption::UserMetadata, metadata)
    }

    // ── additional ───────────────────────────────────────────

    pub fn set_config_file(self, path: impl Into<String>) -> Self {
        self.set(ScanOption::ConfigFile, path.into())
    }

    pub fn set_max_sendto_failures(self, max: u32) -> Self {
        self.set(ScanOption::MaxSendtoFailures, max)
    }

    pub fn set_min_hitrate(self, rate: f64) -> Self {
        self.set(ScanOption::MinHitrate, rate)
    }

    pub fn set_sender_threads(self, count: u32) -> Self {
        self.set(ScanOption::SenderThreads, count)
    }

    /// Comma-separated list of cores to pin to.
    pub fn set_cores(self, cores: impl Into<String>) -> Self {
        self.set(ScanOption::Cores, cores.into())
    }

    /// Ignore invalid entries in whitelist/blacklist files.
    pub fn ignore_invalid_hosts(self, enabled: bool) -> Self {
        self.set(ScanOption::IgnoreInvalidHosts, enabled)
    }

    // ── execution ────────────────────────────────────────────

    /// The invocation [`ZMap::execute`] would run right now.
    pub fn command(&self) -> CommandInvocation {
        CommandInvocation::new(&self.executable_path, &self.config)
    }

    /// Runs the current configuration. Never fails; inspect the result's status.
    pub async fn execute(&self) -> ExecutionResult {
        let invocation = self.command();
        debug!(command = %invocation, "executing zmap");

        let result = self.runner.run(&invocation.program, &invocation.args).await;
        if !result.is_success() {
            warn!(
                status = ?result.status,
                exit_code = ?result.exit_code,
                "zmap did not complete: {}",
                result.error.as_deref().unwrap_or(EXECUTION_FAILED)
            );
        }
        result
    }

    /// Executes and parses delimited rows only.
    ///
    /// Bare-address output parses to nothing here; use
    /// [`ZMap::execute_and_parse_with`] with [`ParsePolicy::BareAddressFallback`]
    /// for quiet or field-restricted output modes.
    pub async fn execute_and_parse(&self) -> Result<Vec<ScanRecord>> {
        self.execute_and_parse_with(ParsePolicy::Strict).await
    }

    pub async fn execute_and_parse_with(&self, policy: ParsePolicy) -> Result<Vec<ScanRecord>> {
        let result = self.execute().await;
        let output = check_execution(result)?;
        Ok(parser::parse_with(&output, policy))
    }

    /// Whether `<exe> -h` completes within `timeout`.
    pub async fn is_available(&self, timeout: Duration) -> bool {
        let args = ["-h".to_string()];
        match tokio::time::timeout(timeout, self.runner.run(&self.executable_path, &args)).await {
            Ok(result) => result.is_success(),
            Err(_) => {
                warn!("{} -h timed out after {:?}", self.executable_path, timeout);
                false
            }
        }
    }
}

impl std::fmt::Debug for ZMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZMap")
            .field("config", &self.config)
            .field("executable_path", &self.executable_path)
            .finish_non_exhaustive()
    }
}

/// Maps a finished execution onto its stdout or the matching error.
pub(crate) fn check_execution(result: ExecutionResult) -> Result<String> {
    match result.status {
        ExecutionStatus::Completed => Ok(result.output),
        ExecutionStatus::Unavailable => Err(ZMapError::Unavailable {
            message: result.error.unwrap_or_else(|| EXECUTION_FAILED.to_string()),
        }),
        ExecutionStatus::Failed => Err(ZMapError::Execution {
            message: result.error.unwrap_or_else(|| EXECUTION_FAILED.to_string()),
            exit_code: result.exit_code,
        }),
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

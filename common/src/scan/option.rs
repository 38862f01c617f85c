//! # Scan Options
//!
//! The closed set of options a [`ScanConfig`](super::ScanConfig) may hold.
//!
//! Each option has:
//! * a camelCase **key**, used when options are read from or written to JSON,
//! * a **flag** spelling, looked up in [`FLAG_TABLE`] first and derived from the key otherwise,
//! * a [`ValueKind`] describing which values it accepts and how they are emitted.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::ZMapError;
use crate::scan::value::OptionValue;
use crate::utils::case;

/// How an option's value is turned into command-line tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Standalone flag when `true`, omitted when `false`.
    Flag,
    /// `<flag> <value>`.
    Scalar,
    /// `--output-fields <a,b,c>`, from a list or a pre-joined string.
    Fields,
    /// JSON text, from a structured value or a pre-serialized string.
    Json,
    /// Trailing positional token(s), never preceded by a flag.
    Positional,
}

impl ValueKind {
    /// Whether `value` has a shape this kind can emit.
    pub fn accepts(self, value: &OptionValue) -> bool {
        match self {
            ValueKind::Flag => matches!(value, OptionValue::Bool(_)),
            // Lists are comma-joined, e.g. `cores: ["0", "1"]`.
            ValueKind::Scalar => matches!(
                value,
                OptionValue::Int(_)
                    | OptionValue::Float(_)
                    | OptionValue::Text(_)
                    | OptionValue::List(_)
            ),
            ValueKind::Fields | ValueKind::Positional => {
                matches!(value, OptionValue::Text(_) | OptionValue::List(_))
            }
            ValueKind::Json => !matches!(value, OptionValue::Bool(_)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScanOption {
    // Basic arguments
    TargetPort,
    OutputFile,
    BlacklistFile,
    WhitelistFile,

    // Scan options
    Rate,
    Bandwidth,
    MaxTargets,
    MaxRuntime,
    MaxResults,
    Probes,
    CooldownTime,
    Seed,
    Retries,
    DryRun,
    ShardTotal,
    ShardCurrent,
    Subnet,

    // Network options
    SourcePort,
    SourceIp,
    GatewayMac,
    SourceMac,
    Interface,
    VpnMode,

    // Probe options
    ProbeModule,
    ProbeArgs,

    // Output options
    OutputModule,
    OutputModuleArgs,
    OutputFields,
    OutputFilter,

    // Logging and metadata
    Verbosity,
    LogFile,
    LogDirectory,
    MetadataFile,
    StatusUpdatesFile,
    Quiet,
    DisableSyslog,
    Notes,
    UserMetadata,

    // Additional options
    ConfigFile,
    MaxSendtoFailures,
    MinHitrate,
    SenderThreads,
    Cores,
    IgnoreInvalidHosts,
}

/// Flag spellings that differ from the generic kebab-case derivation, or that
/// are pinned so a key rename can never silently change the emitted flag.
pub const FLAG_TABLE: &[(ScanOption, &str)] = &[
    (ScanOption::ProbeModule, "--probe-module"),
    (ScanOption::TargetPort, "--target-port"),
    (ScanOption::SourcePort, "--source-port"),
    (ScanOption::SourceIp, "--source-ip"),
    (ScanOption::GatewayMac, "--gateway-mac"),
    (ScanOption::SourceMac, "--source-mac"),
    (ScanOption::MaxTargets, "--max-targets"),
    (ScanOption::MaxResults, "--max-results"),
    (ScanOption::MaxRuntime, "--max-runtime"),
    (ScanOption::CooldownTime, "--cooldown-time"),
    (ScanOption::ProbeArgs, "--probe-args"),
    (ScanOption::OutputFile, "--output-file"),
    (ScanOption::BlacklistFile, "--blacklist-file"),
    (ScanOption::WhitelistFile, "--whitelist-file"),
    (ScanOption::OutputFields, "--output-fields"),
    (ScanOption::OutputModule, "--output-module"),
    (ScanOption::OutputModuleArgs, "--output-module-args"),
    (ScanOption::OutputFilter, "--output-filter"),
    (ScanOption::LogFile, "--log-file"),
    (ScanOption::LogDirectory, "--log-directory"),
    (ScanOption::MetadataFile, "--metadata-file"),
    (ScanOption::StatusUpdatesFile, "--status-updates-file"),
    (ScanOption::DisableSyslog, "--disable-syslog"),
    (ScanOption::UserMetadata, "--user-metadata"),
    (ScanOption::ConfigFile, "--config"),
    (ScanOption::MaxSendtoFailures, "--max-sendto-failures"),
    (ScanOption::MinHitrate, "--min-hitrate"),
    (ScanOption::SenderThreads, "--sender-threads"),
];

impl ScanOption {
    pub const ALL: [ScanOption; 44] = [
        ScanOption::TargetPort,
        ScanOption::OutputFile,
        ScanOption::BlacklistFile,
        ScanOption::WhitelistFile,
        ScanOption::Rate,
        ScanOption::Bandwidth,
        ScanOption::MaxTargets,
        ScanOption::MaxRuntime,
        ScanOption::MaxResults,
        ScanOption::Probes,
        ScanOption::CooldownTime,
        ScanOption::Seed,
        ScanOption::Retries,
        ScanOption::DryRun,
        ScanOption::ShardTotal,
        ScanOption::ShardCurrent,
        ScanOption::Subnet,
        ScanOption::SourcePort,
        ScanOption::SourceIp,
        ScanOption::GatewayMac,
        ScanOption::SourceMac,
        ScanOption::Interface,
        ScanOption::VpnMode,
        ScanOption::ProbeModule,
        ScanOption::ProbeArgs,
        ScanOption::OutputModule,
        ScanOption::OutputModuleArgs,
        ScanOption::OutputFields,
        ScanOption::OutputFilter,
        ScanOption::Verbosity,
        ScanOption::LogFile,
        ScanOption::LogDirectory,
        ScanOption::MetadataFile,
        ScanOption::StatusUpdatesFile,
        ScanOption::Quiet,
        ScanOption::DisableSyslog,
        ScanOption::Notes,
        ScanOption::UserMetadata,
        ScanOption::ConfigFile,
        ScanOption::MaxSendtoFailures,
        ScanOption::MinHitrate,
        ScanOption::SenderThreads,
        ScanOption::Cores,
        ScanOption::IgnoreInvalidHosts,
    ];

    /// The camelCase key of this option.
    pub fn key(self) -> &'static str {
        match self {
            ScanOption::TargetPort => "targetPort",
            ScanOption::OutputFile => "outputFile",
            ScanOption::BlacklistFile => "blacklistFile",
            ScanOption::WhitelistFile => "whitelistFile",
            ScanOption::Rate => "rate",
            ScanOption::Bandwidth => "bandwidth",
            ScanOption::MaxTargets => "maxTargets",
            ScanOption::MaxRuntime => "maxRuntime",
            ScanOption::MaxResults => "maxResults",
            ScanOption::Probes => "probes",
            ScanOption::CooldownTime => "cooldownTime",
            ScanOption::Seed => "seed",
            ScanOption::Retries => "retries",
            ScanOption::DryRun => "dryRun",
            ScanOption::ShardTotal => "shardTotal",
            ScanOption::ShardCurrent => "shardCurrent",
            ScanOption::Subnet => "subnet",
            ScanOption::SourcePort => "sourcePort",
            ScanOption::SourceIp => "sourceIp",
            ScanOption::GatewayMac => "gatewayMac",
            ScanOption::SourceMac => "sourceMac",
            ScanOption::Interface => "interface",
            ScanOption::VpnMode => "vpnMode",
            ScanOption::ProbeModule => "probeModule",
            ScanOption::ProbeArgs => "probeArgs",
            ScanOption::OutputModule => "outputModule",
            ScanOption::OutputModuleArgs => "outputModuleArgs",
            ScanOption::OutputFields => "outputFields",
            ScanOption::OutputFilter => "outputFilter",
            ScanOption::Verbosity => "verbosity",
            ScanOption::LogFile => "logFile",
            ScanOption::LogDirectory => "logDirectory",
            ScanOption::MetadataFile => "metadataFile",
            ScanOption::StatusUpdatesFile => "statusUpdatesFile",
            ScanOption::Quiet => "quiet",
            ScanOption::DisableSyslog => "disableSyslog",
            ScanOption::Notes => "notes",
            ScanOption::UserMetadata => "userMetadata",
            ScanOption::ConfigFile => "configFile",
            ScanOption::MaxSendtoFailures => "maxSendtoFailures",
            ScanOption::MinHitrate => "minHitrate",
            ScanOption::SenderThreads => "senderThreads",
            ScanOption::Cores => "cores",
            ScanOption::IgnoreInvalidHosts => "ignoreInvalidHosts",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            ScanOption::DryRun
            | ScanOption::VpnMode
            | ScanOption::Quiet
            | ScanOption::DisableSyslog
            | ScanOption::IgnoreInvalidHosts => ValueKind::Flag,
            ScanOption::OutputFields => ValueKind::Fields,
            ScanOption::UserMetadata => ValueKind::Json,
            ScanOption::Subnet => ValueKind::Positional,
            _ => ValueKind::Scalar,
        }
    }

    /// Explicit entry from [`FLAG_TABLE`], if any.
    pub fn mapped_flag(self) -> Option<&'static str> {
        FLAG_TABLE
            .iter()
            .find(|(option, _)| *option == self)
            .map(|(_, flag)| *flag)
    }

    /// The flag spelling emitted for this option.
    pub fn flag(self) -> Cow<'static, str> {
        match self.mapped_flag() {
            Some(flag) => Cow::Borrowed(flag),
            None => Cow::Owned(case::key_to_flag(self.key())),
        }
    }
}

impl fmt::Display for ScanOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScanOption {
    type Err = ZMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScanOption::ALL
            .iter()
            .copied()
            .find(|option| option.key() == s)
            .ok_or_else(|| ZMapError::config(format!("unknown scan option '{s}'")))
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

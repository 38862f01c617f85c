pub mod modules;
pub mod scan;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use netzap_common::config::{Config, DEFAULT_EXECUTABLE, DEFAULT_PROBE_TIMEOUT};
use netzap_common::scan::ScanType;
use netzap_core::service::DEFAULT_PORT;

#[derive(Parser)]
#[command(name = "netzap")]
#[command(version, about = "Typed front end for the ZMap network scanner.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the zmap executable
    #[arg(long, global = true, default_value = DEFAULT_EXECUTABLE)]
    pub zmap: String,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Less output (-q: no headers, -qq: addresses only)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// More log output (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a scan and print the responding hosts
    #[command(alias = "s")]
    Scan {
        #[command(flatten)]
        args: ScanArgs,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the zmap command a scan would run, without running it
    #[command(alias = "c")]
    Command {
        #[command(flatten)]
        args: ScanArgs,
    },
    /// List the probe modules zmap supports
    ProbeModules,
    /// List the output modules zmap supports
    OutputModules,
    /// List the output fields zmap can emit
    OutputFields,
    /// Show the zmap version
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Targets (CIDR blocks or addresses)
    #[arg(required = true, value_name = "TARGET")]
    pub targets: Vec<String>,

    /// Probe module
    #[arg(short = 't', long = "type", default_value = "tcp_synscan")]
    pub scan_type: ScanType,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Packets per second
    #[arg(short = 'r', long)]
    pub rate: Option<u32>,

    /// Bandwidth cap, e.g. 10M
    #[arg(short = 'B', long)]
    pub bandwidth: Option<String>,

    #[arg(short = 'i', long)]
    pub interface: Option<String>,

    /// Comma-separated output fields
    #[arg(short = 'f', long, value_delimiter = ',')]
    pub output_fields: Vec<String>,

    #[arg(long)]
    pub dry_run: bool,

    /// JSON file of additional options (camelCase keys)
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cli: &CommandLine) -> Self {
        Config {
            zmap_path: cli.zmap.clone(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            no_banner: cli.no_banner,
            quiet: cli.quiet,
            verbosity: cli.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_flags_parse() {
        let cli = CommandLine::try_parse_from([
            "netzap", "-qq", "--zmap", "/opt/zmap", "scan", "10.0.0.0/8", "192.168.0.0/16",
            "--type", "udp", "-p", "53", "-f", "saddr,dport", "--dry-run",
        ])
        .unwrap();

        let cfg = Config::from(&cli);
        assert_eq!(cfg.quiet, 2);
        assert_eq!(cfg.zmap_path, "/opt/zmap");

        match cli.command {
            Commands::Scan { args, json } => {
                assert!(!json);
                assert_eq!(args.targets, vec!["10.0.0.0/8", "192.168.0.0/16"]);
                assert_eq!(args.scan_type, ScanType::Udp);
                assert_eq!(args.port, 53);
                assert_eq!(args.output_fields, vec!["saddr", "dport"]);
                assert!(args.dry_run);
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn unknown_scan_type_is_rejected() {
        assert!(CommandLine::try_parse_from(["netzap", "scan", "10.0.0.1", "--type", "smtp"]).is_err());
    }
}

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;

use crate::commands::ScanArgs;
use crate::mprint;
use crate::terminal::{colors, format, print, spinner};
use netzap_common::config::Config;
use netzap_common::runner::CommandRunner;
use netzap_common::scan::{ScanConfig, ScanOption};
use netzap_core::service::{ScanReport, ScanRequest, ScanService};

/// Builds the request the flags describe. Explicit flags override the options file.
pub fn build_request(args: &ScanArgs) -> anyhow::Result<ScanRequest> {
    let mut options = match &args.options {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read options file {}", path.display()))?;
            ScanConfig::from_json_str(&json)
                .with_context(|| format!("invalid options in {}", path.display()))?
        }
        None => ScanConfig::new(),
    };

    if args.targets.len() > 1 {
        options.insert(ScanOption::Subnet, args.targets.clone());
    }
    if let Some(rate) = args.rate {
        options.insert(ScanOption::Rate, rate);
    }
    if let Some(bandwidth) = &args.bandwidth {
        options.insert(ScanOption::Bandwidth, bandwidth.as_str());
    }
    if let Some(interface) = &args.interface {
        options.insert(ScanOption::Interface, interface.as_str());
    }
    if !args.output_fields.is_empty() {
        options.insert(ScanOption::OutputFields, args.output_fields.clone());
    }
    if args.dry_run {
        options.insert(ScanOption::DryRun, true);
    }

    Ok(ScanRequest {
        subnet: args.targets.join(" "),
        port: args.port,
        scan_type: args.scan_type,
        options,
    })
}

pub fn command(args: &ScanArgs, runner: Arc<dyn CommandRunner>, cfg: &Config) -> anyhow::Result<()> {
    let request = build_request(args)?;
    let service = ScanService::new(runner, cfg.clone());
    let invocation = service.prepare(&request)?.command();

    if cfg.quiet > 1 {
        mprint!(&invocation.to_string());
        return Ok(());
    }

    print::header("zmap command", cfg.quiet);
    print::set_key_width(["Program", "Arguments"]);
    print::aligned_line("Program", invocation.program.as_str());
    print::aligned_line("Arguments", invocation.args.len().to_string());
    mprint!();
    mprint!(&invocation.to_string());
    Ok(())
}

pub async fn scan(
    args: &ScanArgs,
    json: bool,
    runner: Arc<dyn CommandRunner>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let request = build_request(args)?;
    let service = ScanService::new(runner, cfg.clone());

    let start_time = Instant::now();
    let handle = spinner::start(cfg.quiet, &format!("Scanning {}...", request.subnet));
    let report = service.run(&request).await;
    handle.finish();

    let report = report.context("scan failed")?;

    if json {
        mprint!(&serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    scan_ends(&report, start_time.elapsed(), cfg);
    Ok(())
}

fn scan_ends(report: &ScanReport, total_time: Duration, cfg: &Config) {
    if cfg.quiet > 1 {
        for host in &report.hosts {
            mprint!(&host.ip);
        }
        return;
    }

    if report.hosts.is_empty() {
        print::header("zero hosts responded", cfg.quiet);
        print::no_results();
        return;
    }

    print::header("scan results", cfg.quiet);
    for (idx, host) in report.hosts.iter().enumerate() {
        print::tree_head(idx, &host.ip);
        print::as_tree_one_level(format::host_to_details(host));
        if idx + 1 != report.hosts.len() {
            mprint!();
        }
    }

    print_summary(report, total_time, cfg);
}

fn print_summary(report: &ScanReport, total_time: Duration, cfg: &Config) {
    let hosts_up: ColoredString = format!("{} hosts up", report.summary.hosts_up).bold().green();
    let scanned: ColoredString = report.summary.hosts_scanned.to_string().bold();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Scan Complete: {hosts_up} of {scanned} in {total_time}").color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => {
            mprint!();
            print::print_status(output.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netzap_common::scan::{OptionValue, ScanType};

    fn args(targets: &[&str]) -> ScanArgs {
        ScanArgs {
            targets: targets.iter().map(|t| t.to_string()).collect(),
            scan_type: ScanType::TcpSyn,
            port: 443,
            rate: Some(1000),
            bandwidth: None,
            interface: Some("eth0".into()),
            output_fields: vec![],
            dry_run: true,
            options: None,
        }
    }

    #[test]
    fn single_target_stays_in_the_request_subnet() {
        let request = build_request(&args(&["10.0.0.0/8"])).unwrap();
        assert_eq!(request.subnet, "10.0.0.0/8");
        assert!(!request.options.contains(ScanOption::Subnet));
        assert_eq!(request.options.get(ScanOption::DryRun), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn several_targets_become_a_list() {
        let request = build_request(&args(&["10.0.0.0/8", "172.16.0.0/12"])).unwrap();
        assert_eq!(
            request.options.get(ScanOption::Subnet),
            Some(&OptionValue::from(vec!["10.0.0.0/8", "172.16.0.0/12"]))
        );
        assert!(request.to_config().iter().any(|(k, _)| k == ScanOption::Interface));
    }

    #[test]
    fn missing_options_file_is_reported() {
        let mut args = args(&["10.0.0.1"]);
        args.options = Some("/nonexistent/netzap-options.json".into());
        let err = build_request(&args).unwrap_err();
        assert!(err.to_string().contains("failed to read options file"));
    }
}

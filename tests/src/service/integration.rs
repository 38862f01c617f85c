#![cfg(test)]
use std::sync::Arc;

use netzap_common::ZMapError;
use netzap_common::config::Config;
use netzap_common::runner::ExecutionResult;
use netzap_common::scan::{ScanConfig, ScanType};
use netzap_core::service::{HostStatus, ScanRequest, ScanService};

use crate::support::ScriptedRunner;

fn service(runner: &Arc<ScriptedRunner>) -> ScanService {
    ScanService::new(runner.clone(), Config::default())
}

#[tokio::test]
async fn json_request_to_report() -> anyhow::Result<()> {
    let runner = Arc::new(ScriptedRunner::stdout("192.168.1.10\n192.168.1.20\n"));
    let request: ScanRequest = serde_json::from_str(
        r#"{
            "subnet": "192.168.1.0/24",
            "port": 8080,
            "options": {"rate": 1000, "outputFields": ["saddr"]}
        }"#,
    )?;

    let report = service(&runner).run(&request).await?;

    assert_eq!(
        runner.scans()[0].1,
        vec![
            "--probe-module",
            "tcp_synscan",
            "--target-port",
            "8080",
            "--rate",
            "1000",
            "--output-fields",
            "saddr",
            "192.168.1.0/24",
        ]
    );
    assert_eq!(report.summary.hosts_scanned, 256);
    assert_eq!(report.summary.hosts_up, 2);
    assert!(report.hosts.iter().all(|h| h.port == 8080 && h.status == HostStatus::Open));
    assert_eq!(report.records[1].dport.as_deref(), Some("8080"));
    Ok(())
}

#[tokio::test]
async fn icmp_hosts_report_icmp() -> anyhow::Result<()> {
    let runner = Arc::new(ScriptedRunner::stdout("10.0.0.1,echoreply\n"));
    let mut request = ScanRequest::new("10.0.0.1");
    request.scan_type = ScanType::IcmpEcho;

    let report = service(&runner).run(&request).await?;

    assert_eq!(runner.scans()[0].1, vec!["--probe-module", "icmp_echoscan", "10.0.0.1"]);
    assert_eq!(report.hosts[0].protocol, "icmp");
    assert_eq!(report.hosts[0].status, HostStatus::Closed);
    assert_eq!(report.summary.hosts_scanned, 1);
    Ok(())
}

#[tokio::test]
async fn udp_gets_the_default_payload() -> anyhow::Result<()> {
    let runner = Arc::new(ScriptedRunner::stdout(""));
    let mut request = ScanRequest::new("10.0.0.0/31");
    request.scan_type = ScanType::Udp;
    request.port = 53;

    let report = service(&runner).run(&request).await?;

    let args = &runner.scans()[0].1;
    let idx = args.iter().position(|a| a == "--probe-args").expect("probe args emitted");
    assert_eq!(args[idx + 1], r#"text "\0""#);
    assert!(report.hosts.is_empty());
    // an empty scan still reports the covered range
    assert_eq!(report.summary.hosts_scanned, 2);
    Ok(())
}

#[tokio::test]
async fn probe_comes_before_the_scan() {
    let runner = Arc::new(ScriptedRunner::stdout(""));
    let svc = ScanService::new(
        runner.clone(),
        Config {
            zmap_path: "/opt/zmap/bin/zmap".into(),
            ..Config::default()
        },
    );

    svc.run(&ScanRequest::new("10.0.0.1")).await.unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, vec!["-h"]);
    assert!(calls.iter().all(|(program, _)| program == "/opt/zmap/bin/zmap"));
}

#[tokio::test]
async fn invalid_option_kind_is_a_config_error() {
    let runner = Arc::new(ScriptedRunner::stdout(""));
    let mut request = ScanRequest::new("10.0.0.1");
    request.options = ScanConfig::new().with(netzap_common::scan::ScanOption::DryRun, "yes");

    let err = service(&runner).run(&request).await.unwrap_err();
    assert!(matches!(err, ZMapError::Config(_)));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn unsupported_scan_type_is_rejected_by_the_request() {
    let err = serde_json::from_str::<ScanRequest>(r#"{"subnet": "10.0.0.1", "scanType": "smtp"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("Unsupported scan type: smtp"));
}

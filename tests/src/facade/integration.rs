#![cfg(test)]
use std::sync::Arc;
use std::time::Duration;

use netzap_common::ZMapError;
use netzap_common::runner::{ExecutionResult, ExecutionStatus};
use netzap_common::scan::probe::ProbeArgKind;
use netzap_common::scan::{ScanConfig, ScanOption};
use netzap_core::ZMap;
use netzap_core::parser::ParsePolicy;
use netzap_core::runner::UnavailableRunner;
use serde_json::json;

use crate::support::ScriptedRunner;

/// What `command()` shows is exactly what `execute()` runs.
#[tokio::test]
async fn command_matches_executed_tokens() -> anyhow::Result<()> {
    let runner = Arc::new(ScriptedRunner::stdout(""));
    let zmap = ZMap::new(runner.clone())
        .tcp_syn_scan(443, ScanConfig::new())
        .targets(["10.0.0.0/8", "192.168.0.0/16"])
        .set_rate(10_000)
        .set_output_fields(vec!["saddr", "classification", "dport"])
        .set_user_metadata(json!({"ticket": 42}))
        .set_dry_run(true)
        .set_quiet(false);

    let shown = zmap.command();
    let result = zmap.execute().await;
    assert_eq!(result.status, ExecutionStatus::Completed);

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "zmap");
    assert_eq!(calls[0].1, shown.args);
    assert_eq!(
        shown.args,
        vec![
            "--probe-module",
            "tcp_synscan",
            "--target-port",
            "443",
            "--rate",
            "10000",
            "--output-fields",
            "saddr,classification,dport",
            "--user-metadata",
            r#"{"ticket":42}"#,
            "--dry-run",
            "10.0.0.0/8",
            "192.168.0.0/16",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn each_execution_recompiles_the_current_config() {
    let runner = Arc::new(ScriptedRunner::default());
    let base = ZMap::new(runner.clone()).target("10.0.0.1");

    base.execute().await;
    base.clone().set_seed(7).execute().await;

    let calls = runner.calls();
    assert_eq!(calls[0].1, vec!["10.0.0.1"]);
    assert_eq!(calls[1].1, vec!["--seed", "7", "10.0.0.1"]);
}

#[tokio::test]
async fn udp_scan_with_file_payload() {
    let runner = Arc::new(ScriptedRunner::default());
    let zmap = ZMap::new(runner.clone())
        .udp_scan(
            161,
            ProbeArgKind::File,
            "/usr/share/zmap/snmp.pkt",
            ScanConfig::new().with(ScanOption::Rate, 500u32),
        )
        .target("10.1.0.0/16");

    zmap.execute().await;
    assert_eq!(
        runner.calls()[0].1,
        vec![
            "--probe-module",
            "udp",
            "--target-port",
            "161",
            "--probe-args",
            "file /usr/share/zmap/snmp.pkt",
            "--rate",
            "500",
            "10.1.0.0/16",
        ]
    );
}

#[tokio::test]
async fn parse_policies_over_the_same_output() -> anyhow::Result<()> {
    let output = "# zmap output\n10.0.0.1,synack,80\n10.0.0.2,rst,80\n";
    let runner = Arc::new(ScriptedRunner::new([
        ExecutionResult::completed(output, Some(0)),
        ExecutionResult::completed(output, Some(0)),
    ]));
    let zmap = ZMap::new(runner).target("10.0.0.0/30");

    let strict = zmap.execute_and_parse().await?;
    let fallback = zmap
        .execute_and_parse_with(ParsePolicy::BareAddressFallback { default_port: 8080 })
        .await?;

    assert_eq!(strict, fallback);
    assert_eq!(strict.len(), 2);
    assert!(strict[0].is_open());
    assert!(!strict[1].is_open());
    Ok(())
}

#[tokio::test]
async fn failed_scan_surfaces_stderr_and_exit_code() {
    let runner = Arc::new(ScriptedRunner::new([ExecutionResult::failed(
        "",
        "[FATAL] recv: could not open device",
        Some(1),
    )]));
    let err = ZMap::new(runner).target("10.0.0.0/8").execute_and_parse().await.unwrap_err();

    assert!(matches!(err, ZMapError::Execution { .. }));
    assert_eq!(err.exit_code(), Some(1));
    assert!(err.to_string().contains("could not open device"));
}

#[tokio::test]
async fn introspection_failure_names_the_operation() {
    let runner = Arc::new(ScriptedRunner::new([ExecutionResult::failed("", "", Some(2))]));
    let err = ZMap::new(runner).list_output_modules().await.unwrap_err();
    assert!(err.to_string().starts_with("Failed to list output modules"));
}

#[tokio::test]
async fn unavailable_host_fails_uniformly() {
    let zmap = ZMap::new(Arc::new(UnavailableRunner::new())).target("10.0.0.0/8");

    assert_eq!(zmap.execute().await.status, ExecutionStatus::Unavailable);
    assert!(matches!(
        zmap.execute_and_parse().await,
        Err(ZMapError::Unavailable { .. })
    ));
    assert!(matches!(
        zmap.list_probe_modules().await,
        Err(ZMapError::Unavailable { .. })
    ));
    assert!(matches!(zmap.help().await, Err(ZMapError::Unavailable { .. })));
    assert!(!zmap.is_available(Duration::from_secs(1)).await);
}

#[tokio::test]
async fn missing_binary_through_a_real_process() {
    let zmap = ZMap::local().set_executable_path("/nonexistent/netzap-test/zmap");

    assert!(!zmap.is_available(Duration::from_secs(2)).await);
    let result = zmap.execute().await;
    assert_eq!(result.status, ExecutionStatus::Unavailable);
    assert!(result.error.is_some());
}

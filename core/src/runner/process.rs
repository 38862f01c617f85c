use std::io::ErrorKind;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use netzap_common::runner::{CommandRunner, ExecutionResult};

/// Fallback message when ZMap fails without writing to stderr.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Runs commands as child processes via `tokio::process`.
///
/// No timeout is applied; callers bound long scans with ZMap's own
/// `--max-runtime` or by dropping the future.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> ExecutionResult {
        debug!(program, ?args, "spawning process");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("{program} was not found in PATH");
                return ExecutionResult::unavailable(format!("{program} not found: {e}"));
            }
            Err(e) => {
                warn!("Failed to launch {program}: {e}");
                return ExecutionResult::unavailable(format!("failed to launch {program}: {e}"));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let exit_code = output.status.code();

        if output.status.success() {
            return ExecutionResult::completed(stdout, exit_code);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let error = if stderr.is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            stderr
        };
        debug!(?exit_code, "{program} exited unsuccessfully");

        // Killed by a signal: no code, report a generic failure code.
        ExecutionResult::failed(stdout, error, exit_code.or(Some(1)))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use netzap_common::runner::ExecutionStatus;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn captures_stdout_on_success() {
        let result = ProcessRunner
            .run("sh", &args(&["-c", "printf '10.0.0.1,synack,80\\n'"]))
            .await;
        assert!(result.is_success());
        assert_eq!(result.output, "10.0.0.1,synack,80\n");
        assert_eq!(result.exit_code, Some(0));
    }

    #[tokio::test]
    async fn reports_stderr_and_exit_code_on_failure() {
        let result = ProcessRunner
            .run("sh", &args(&["-c", "echo partial; echo denied >&2; exit 3"]))
            .await;
        assert_eq!(result.status, ExecutionStatus::Failed);
        assert_eq!(result.output, "partial\n");
        assert_eq!(result.error.as_deref(), Some("denied"));
        assert_eq!(result.exit_code, Some(3));
    }

    #[tokio::test]
    async fn silent_failure_gets_generic_message() {
        let result = ProcessRunner.run("sh", &args(&["-c", "exit 2"])).await;
        assert_eq!(result.error.as_deref(), Some(UNKNOWN_ERROR));
    }

    #[tokio::test]
    async fn missing_binary_is_unavailable() {
        let result = ProcessRunner
            .run("netzap-definitely-missing-binary", &[])
            .await;
        assert_eq!(result.status, ExecutionStatus::Unavailable);
        assert!(result.exit_code.is_none());
    }
}

//! Help, listing and version queries against the configured binary.

use tracing::debug;

use netzap_common::error::{Result, ZMapError};
use netzap_common::runner::ExecutionStatus;

use super::ZMap;

impl ZMap {
    pub async fn list_probe_modules(&self) -> Result<Vec<String>> {
        let output = self
            .query("list probe modules", &["--list-probe-modules"])
            .await?;
        Ok(non_empty_lines(&output))
    }

    pub async fn list_output_modules(&self) -> Result<Vec<String>> {
        let output = self
            .query("list output modules", &["--list-output-modules"])
            .await?;
        Ok(non_empty_lines(&output))
    }

    /// Field names only; the description column is dropped.
    pub async fn list_output_fields(&self) -> Result<Vec<String>> {
        let output = self
            .query("list output fields", &["--list-output-fields"])
            .await?;
        Ok(output
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect())
    }

    pub async fn help(&self) -> Result<String> {
        self.query("get ZMap help", &["--help"]).await
    }

    pub async fn version(&self) -> Result<String> {
        let output = self.query("get ZMap version", &["--version"]).await?;
        Ok(output.trim().to_string())
    }

    /// Help for one probe module, or for all of them when `module` is `None`.
    pub async fn probe_module_help(&self, module: Option<&str>) -> Result<String> {
        match module {
            Some(module) => {
                self.query("get probe module help", &["--probe-module", module, "--help"])
                    .await
            }
            None => {
                self.query("get probe module help", &["--help-probe-modules"])
                    .await
            }
        }
    }

    /// Help for one output module, or for all of them when `module` is `None`.
    pub async fn output_module_help(&self, module: Option<&str>) -> Result<String> {
        match module {
            Some(module) => {
                self.query(
                    "get output module help",
                    &["--output-module", module, "--help"],
                )
                .await
            }
            None => {
                self.query("get output module help", &["--help-output-modules"])
                    .await
            }
        }
    }

    async fn query(&self, operation: &'static str, args: &[&str]) -> Result<String> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        debug!("{} {}", self.executable_path, args.join(" "));

        let result = self.runner.run(&self.executable_path, &args).await;
        match result.status {
            ExecutionStatus::Completed => Ok(result.output),
            ExecutionStatus::Unavailable => Err(ZMapError::Unavailable {
                message: result.error.unwrap_or_else(|| format!("Failed to {operation}")),
            }),
            ExecutionStatus::Failed => Err(ZMapError::Introspection {
                operation,
                message: result.error.unwrap_or_else(|| "Unknown error".to_string()),
            }),
        }
    }
}

fn non_empty_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

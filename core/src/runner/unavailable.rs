use async_trait::async_trait;

use netzap_common::runner::{CommandRunner, ExecutionResult};

pub const UNAVAILABLE_MESSAGE: &str =
    "Command execution is not supported in this environment. Use a backend service instead.";

/// A runner for hosts that cannot spawn processes. Every call fails uniformly.
#[derive(Debug, Clone, Default)]
pub struct UnavailableRunner {
    message: Option<String>,
}

impl UnavailableRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

#[async_trait]
impl CommandRunner for UnavailableRunner {
    async fn run(&self, _program: &str, _args: &[String]) -> ExecutionResult {
        ExecutionResult::unavailable(self.message.as_deref().unwrap_or(UNAVAILABLE_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netzap_common::runner::ExecutionStatus;

    #[tokio::test]
    async fn always_unavailable() {
        let result = UnavailableRunner::new().run("zmap", &["--version".into()]).await;
        assert_eq!(result.status, ExecutionStatus::Unavailable);
        assert_eq!(result.error.as_deref(), Some(UNAVAILABLE_MESSAGE));
        assert!(result.output.is_empty());

        let custom = UnavailableRunner::with_message("sandboxed").run("zmap", &[]).await;
        assert_eq!(custom.error.as_deref(), Some("sandboxed"));
    }
}

//! # Command Runner Port
//!
//! The boundary between netzap and the process-execution facility.
//!
//! The core never spawns processes itself. It hands a program and its
//! arguments to a [`CommandRunner`] chosen by the host at construction time,
//! and receives an [`ExecutionResult`] back. Runners never raise: a missing
//! binary or a host that cannot execute processes at all is reported as
//! [`ExecutionStatus::Unavailable`].

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// The process ran and exited successfully.
    Completed,
    /// The process ran and reported a failure.
    Failed,
    /// The process could not be started.
    Unavailable,
}

/// Outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    /// Captured stdout (possibly partial on failure).
    pub output: String,
    pub exit_code: Option<i32>,
    /// Captured stderr or a description of why the process did not run.
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn completed(output: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            status: ExecutionStatus::Completed,
            output: output.into(),
            exit_code,
            error: None,
        }
    }

    pub fn failed(
        output: impl Into<String>,
        error: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self {
            status: ExecutionStatus::Failed,
            output: output.into(),
            exit_code,
            error: Some(error.into()),
        }
    }

    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            status: ExecutionStatus::Unavailable,
            output: String::new(),
            exit_code: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Completed
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` exactly as given, without a shell.
    async fn run(&self, program: &str, args: &[String]) -> ExecutionResult;
}

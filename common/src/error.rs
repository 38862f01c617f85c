//! Unified error type for netzap.

use thiserror::Error;

/// Every way a scan can fail before, during or after the ZMap invocation.
///
/// Output parsing is deliberately absent: malformed lines are dropped, never raised.
#[derive(Error, Debug)]
pub enum ZMapError {
    /// The binary could not be located or execution is not supported by the host.
    #[error("ZMap is unavailable: {message}")]
    Unavailable { message: String },

    /// ZMap ran but reported a failure.
    #[error("ZMap execution failed: {message}")]
    Execution {
        message: String,
        exit_code: Option<i32>,
    },

    /// A help, listing or version call failed.
    #[error("Failed to {operation}: {message}")]
    Introspection {
        operation: &'static str,
        message: String,
    },

    /// Invalid option key, value kind or request field.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ZMapError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Exit code reported by ZMap, when the failure came from a finished process.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Execution { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ZMapError>;

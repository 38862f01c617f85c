use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use netzap_common::runner::{CommandRunner, ExecutionResult};

/// One recorded call: the program and its arguments.
pub type Invocation = (String, Vec<String>);

/// A runner that answers from a script and records every call.
///
/// `-h` probes are answered successfully without consuming the script.
/// Once the script runs out, every call completes with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    script: Mutex<VecDeque<ExecutionResult>>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new(script: impl IntoIterator<Item = ExecutionResult>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn stdout(output: &str) -> Self {
        Self::new([ExecutionResult::completed(output, Some(0))])
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Calls other than availability probes.
    pub fn scans(&self) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|(_, args)| args.as_slice() != ["-h"])
            .collect()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> ExecutionResult {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((program.to_string(), args.to_vec()));
        }

        if args == ["-h"] {
            return ExecutionResult::completed("Usage: zmap [OPTION]... [SUBNETS]...", Some(0));
        }

        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| ExecutionResult::completed("", Some(0)))
    }
}

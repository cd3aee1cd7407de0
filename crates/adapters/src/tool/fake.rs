// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake tool runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{OutputMode, ToolError, ToolInvocation, ToolOutput, ToolRunner};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Recorded tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub cwd: Option<PathBuf>,
    pub output: OutputMode,
}

impl ToolCall {
    /// Arguments joined with spaces
    pub fn line(&self) -> String {
        self.args.join(" ")
    }
}

#[derive(Default)]
struct FakeToolState {
    responses: Vec<(Vec<String>, ToolOutput)>,
    calls: Vec<ToolCall>,
}

/// Fake runner with scripted responses.
///
/// A response is picked by the longest scripted argument prefix; unmatched
/// invocations exit 0 with empty output.
#[derive(Clone, Default)]
pub struct FakeToolRunner {
    state: Arc<Mutex<FakeToolState>>,
}

impl FakeToolRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the result for invocations whose arguments start with `prefix`
    pub fn respond(&self, prefix: &[&str], exit_code: i32, stdout: impl AsRef<[u8]>) {
        self.lock().responses.push((
            prefix.iter().map(|s| s.to_string()).collect(),
            ToolOutput {
                exit_code,
                stdout: stdout.as_ref().to_vec(),
            },
        ));
    }

    pub fn calls(&self) -> Vec<ToolCall> {
        self.lock().calls.clone()
    }

    /// Argument lines of all recorded calls
    pub fn lines(&self) -> Vec<String> {
        self.lock().calls.iter().map(ToolCall::line).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeToolState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ToolRunner for FakeToolRunner {
    async fn run(&self, invocation: ToolInvocation) -> Result<ToolOutput, ToolError> {
        let output = {
            let mut state = self.lock();
            let args = invocation.arg_list().to_vec();
            let output = state
                .responses
                .iter()
                .filter(|(prefix, _)| args.starts_with(prefix))
                .max_by_key(|(prefix, _)| prefix.len())
                .map(|(_, out)| out.clone())
                .unwrap_or_default();
            state.calls.push(ToolCall {
                program: invocation.program().to_string(),
                args,
                env: invocation.env().clone(),
                cwd: invocation.working_dir().map(PathBuf::from),
                output: invocation.output_mode(),
            });
            output
        };
        tokio::task::yield_now().await;
        Ok(output)
    }
}

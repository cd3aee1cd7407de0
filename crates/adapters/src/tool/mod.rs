// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Infrastructure tool runner adapters

mod process;

pub use process::ProcessToolRunner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeToolRunner, ToolCall};

use async_trait::async_trait;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How the child's standard output is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Child writes straight to our stdout; nothing is captured
    #[default]
    Inherit,
    /// Captured without echo
    Capture,
    /// Echoed to our stdout as it arrives and captured
    Tee,
}

/// A single invocation of the tool
#[derive(Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    program: String,
    args: Vec<String>,
    secret_args: Vec<usize>,
    env: BTreeMap<String, String>,
    cwd: Option<PathBuf>,
    output: OutputMode,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            secret_args: Vec::new(),
            env: BTreeMap::new(),
            cwd: None,
            output: OutputMode::Inherit,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add an argument that is masked in [`ToolInvocation::command_line`]
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secret_args.push(self.args.len());
        self.args.push(arg.into());
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn output(mut self, mode: OutputMode) -> Self {
        self.output = mode;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arg_list(&self) -> &[String] {
        &self.args
    }

    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output
    }

    /// Printable command line with secret arguments masked
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.clone()];
        for (i, arg) in self.args.iter().enumerate() {
            if self.secret_args.contains(&i) {
                parts.push("***".to_string());
            } else {
                parts.push(arg.clone());
            }
        }
        parts.join(" ")
    }
}

impl std::fmt::Debug for ToolInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolInvocation")
            .field("command_line", &self.command_line())
            .field("env_keys", &self.env.keys().collect::<Vec<_>>())
            .field("cwd", &self.cwd)
            .field("output", &self.output)
            .finish()
    }
}

/// Result of a finished invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub exit_code: i32,
    /// Captured stdout bytes, as written; empty in [`OutputMode::Inherit`]
    pub stdout: Vec<u8>,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Captured output as text, invalid UTF-8 replaced
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Last non-empty line of the captured output, trimmed
    pub fn last_line(&self) -> Option<String> {
        self.text()
            .lines()
            .map(str::trim)
            .rfind(|l| !l.is_empty())
            .map(str::to_string)
    }
}

/// Errors from running the tool
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to start '{program}': {message}")]
    Spawn { program: String, message: String },
    #[error("i/o error while running '{program}': {message}")]
    Io { program: String, message: String },
}

/// Adapter for running the infrastructure tool
#[async_trait]
pub trait ToolRunner: Clone + Send + Sync + 'static {
    /// Run to completion. A non-zero exit is reported in [`ToolOutput`], not as an error.
    async fn run(&self, invocation: ToolInvocation) -> Result<ToolOutput, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_masks_secret_args() {
        let inv = ToolInvocation::new("pulumi")
            .args(["config", "set", "db:password"])
            .secret_arg("hunter2")
            .arg("--secret");
        assert_eq!(inv.command_line(), "pulumi config set db:password *** --secret");
        assert_eq!(inv.arg_list()[3], "hunter2");
        assert!(!format!("{:?}", inv).contains("hunter2"));
    }

    #[test]
    fn last_line_ignores_trailing_blank_lines() {
        let out = ToolOutput {
            exit_code: 0,
            stdout: b"v3.100.0\n\n".to_vec(),
        };
        assert_eq!(out.last_line().as_deref(), Some("v3.100.0"));
        assert_eq!(ToolOutput::default().last_line(), None);
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The infrastructure tool's command vocabulary

use crate::error::EngineError;
use sl_adapters::{OutputMode, ToolInvocation, ToolOutput, ToolRunner};
use sl_core::{ConfigEntry, MutateCommand};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub type ToolEnv = BTreeMap<String, String>;

/// Builds and runs tool commands against one program directory
#[derive(Clone)]
pub struct StackTool<T> {
    runner: T,
    program: String,
    cwd: PathBuf,
}

impl<T: ToolRunner> StackTool<T> {
    pub fn new(runner: T, program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            program: program.into(),
            cwd: cwd.into(),
        }
    }

    fn invocation(&self, env: &ToolEnv) -> ToolInvocation {
        ToolInvocation::new(&self.program)
            .envs(env.clone())
            .cwd(&self.cwd)
    }

    /// Run and turn a non-zero exit into [`EngineError::ToolInvocationFailed`]
    async fn run_checked(&self, invocation: ToolInvocation) -> Result<ToolOutput, EngineError> {
        let command_line = invocation.command_line();
        let output = self.runner.run(invocation).await?;
        if !output.success() {
            return Err(EngineError::ToolInvocationFailed {
                exit_code: output.exit_code,
                command_line,
            });
        }
        Ok(output)
    }

    /// Reported version, without a leading `v`
    pub async fn version(&self) -> Result<String, EngineError> {
        let output = self
            .run_checked(
                ToolInvocation::new(&self.program)
                    .arg("version")
                    .output(OutputMode::Capture),
            )
            .await?;
        let line = output.last_line().unwrap_or_default();
        Ok(line.strip_prefix('v').unwrap_or(&line).to_string())
    }

    /// Log in to the remote state backend
    pub async fn login(&self, backend_url: &str, env: &ToolEnv) -> Result<(), EngineError> {
        let invocation = self.invocation(env).args(["login", "-c", backend_url]);
        match self.run_checked(invocation).await {
            Err(EngineError::ToolInvocationFailed {
                exit_code,
                command_line,
            }) => Err(EngineError::Credential(format!(
                "'{}' failed with exit code {}",
                command_line, exit_code
            ))),
            other => other.map(|_| ()),
        }
    }

    pub async fn select_stack(&self, stack: &str, env: &ToolEnv) -> Result<(), EngineError> {
        self.run_checked(self.invocation(env).args(["stack", "select", stack]))
            .await
            .map(|_| ())
    }

    pub async fn init_stack(&self, stack: &str, env: &ToolEnv) -> Result<(), EngineError> {
        self.run_checked(self.invocation(env).args([
            "stack",
            "init",
            stack,
            "--secrets-provider",
            "passphrase",
        ]))
        .await
        .map(|_| ())
    }

    /// Stored value of `key`; `None` when the tool cannot read it
    pub async fn config_get(&self, key: &str, env: &ToolEnv) -> Result<Option<String>, EngineError> {
        let output = self
            .runner
            .run(
                self.invocation(env)
                    .args(["config", "get", key])
                    .output(OutputMode::Capture),
            )
            .await?;
        if !output.success() {
            tracing::debug!(key, exit_code = output.exit_code, "no stored value");
            return Ok(None);
        }
        Ok(Some(output.text().trim_end_matches(['\r', '\n']).to_string()))
    }

    pub async fn config_set(&self, entry: &ConfigEntry, env: &ToolEnv) -> Result<(), EngineError> {
        // `--` keeps values such as `-5` from being read as flags
        let invocation = self.invocation(env).args(["config", "set", entry.key.as_str()]);
        let invocation = if entry.is_secret {
            invocation.args(["--secret", "--"]).secret_arg(&entry.value)
        } else {
            invocation.arg("--").arg(&entry.value)
        };
        self.run_checked(invocation).await.map(|_| ())
    }

    /// Pass-through run of a mutate command. The exit code is returned as is;
    /// the command line is returned for diagnostics.
    pub async fn exec(
        &self,
        command: MutateCommand,
        raw_args: &[String],
        env: &ToolEnv,
        output: OutputMode,
    ) -> Result<(ToolOutput, String), EngineError> {
        let invocation = self
            .invocation(env)
            .arg(command.as_str())
            .args(raw_args.iter().cloned())
            .output(output);
        let command_line = invocation.command_line();
        let result = self.runner.run(invocation).await?;
        Ok((result, command_line))
    }
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;

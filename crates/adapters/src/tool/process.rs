// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child-process tool runner

use super::{OutputMode, ToolError, ToolInvocation, ToolOutput, ToolRunner};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

/// Runs the tool as a child process.
///
/// The child inherits this process's environment with the invocation's
/// variables layered on top.
#[derive(Clone, Default, Debug)]
pub struct ProcessToolRunner;

impl ProcessToolRunner {
    pub fn new() -> Self {
        Self
    }
}

fn io_error(program: &str, e: std::io::Error) -> ToolError {
    ToolError::Io {
        program: program.to_string(),
        message: e.to_string(),
    }
}

#[async_trait]
impl ToolRunner for ProcessToolRunner {
    async fn run(&self, invocation: ToolInvocation) -> Result<ToolOutput, ToolError> {
        let program = invocation.program().to_string();
        let mut cmd = Command::new(&program);
        cmd.args(invocation.arg_list())
            .envs(invocation.env())
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(cwd) = invocation.working_dir() {
            cmd.current_dir(cwd);
        }

        let mode = invocation.output_mode();
        cmd.stdout(match mode {
            OutputMode::Inherit => Stdio::inherit(),
            OutputMode::Capture | OutputMode::Tee => Stdio::piped(),
        });

        let mut child = cmd.spawn().map_err(|e| ToolError::Spawn {
            program: program.clone(),
            message: e.to_string(),
        })?;

        let mut captured = Vec::new();
        if let Some(mut stdout) = child.stdout.take() {
            let mut echo = tokio::io::stdout();
            let mut buf = [0u8; 8192];
            loop {
                let n = stdout
                    .read(&mut buf)
                    .await
                    .map_err(|e| io_error(&program, e))?;
                if n == 0 {
                    break;
                }
                if mode == OutputMode::Tee {
                    echo.write_all(&buf[..n])
                        .await
                        .map_err(|e| io_error(&program, e))?;
                    echo.flush().await.map_err(|e| io_error(&program, e))?;
                }
                captured.extend_from_slice(&buf[..n]);
            }
        }

        let status = child.wait().await.map_err(|e| io_error(&program, e))?;

        Ok(ToolOutput {
            exit_code: status.code().unwrap_or(-1),
            stdout: captured,
        })
    }
}

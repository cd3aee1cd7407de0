// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Azure Pipelines logging-command sink

use super::VariableSink;
use std::io::Write;
use std::sync::Mutex;

/// Writes `##vso[task.setvariable ...]` logging commands
pub struct PipelineVariableSink<W: Write + Send> {
    out: Mutex<W>,
}

impl PipelineVariableSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> PipelineVariableSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%AZP25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(';', "%3B").replace(']', "%5D")
}

/// Format a single setvariable logging command
pub(crate) fn set_variable_command(name: &str, value: &str, is_secret: bool) -> String {
    format!(
        "##vso[task.setvariable variable={};issecret={}]{}",
        escape_property(name),
        is_secret,
        escape_data(value)
    )
}

impl<W: Write + Send> VariableSink for PipelineVariableSink<W> {
    fn set_variable(&self, name: &str, value: &str, is_secret: bool) -> std::io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{}", set_variable_command(name, value, is_secret))?;
        out.flush()
    }
}

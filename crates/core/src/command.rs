// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command requests and the closed command vocabulary

use crate::error::ValidationError;
use crate::stack::StackIdentity;
use std::fmt;

/// Tool sub-commands that mutate stack state and run under the per-stack lock
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutateCommand {
    Preview,
    Up,
    Destroy,
    Refresh,
    Import,
    Cancel,
}

impl MutateCommand {
    /// Sub-command word passed to the tool
    pub fn as_str(self) -> &'static str {
        match self {
            MutateCommand::Preview => "preview",
            MutateCommand::Up => "up",
            MutateCommand::Destroy => "destroy",
            MutateCommand::Refresh => "refresh",
            MutateCommand::Import => "import",
            MutateCommand::Cancel => "cancel",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Init,
    Exists,
    UpdateConfig,
    Mutate(MutateCommand),
}

impl CommandKind {
    /// Classify a raw command string; anything outside the vocabulary is rejected
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let kind = match normalized.to_ascii_lowercase().as_str() {
            "init" | "stack init" => CommandKind::Init,
            "exists" | "stack exists" => CommandKind::Exists,
            "update-config" | "config" => CommandKind::UpdateConfig,
            "preview" => CommandKind::Mutate(MutateCommand::Preview),
            "up" | "update" => CommandKind::Mutate(MutateCommand::Up),
            "destroy" => CommandKind::Mutate(MutateCommand::Destroy),
            "refresh" => CommandKind::Mutate(MutateCommand::Refresh),
            "import" => CommandKind::Mutate(MutateCommand::Import),
            "cancel" => CommandKind::Mutate(MutateCommand::Cancel),
            _ => return Err(ValidationError::UnsupportedCommand(raw.to_string())),
        };
        Ok(kind)
    }

    /// Whether the protocol for this kind takes the per-stack lock
    pub fn takes_stack_lock(self) -> bool {
        matches!(self, CommandKind::UpdateConfig | CommandKind::Mutate(_))
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Init => write!(f, "init"),
            CommandKind::Exists => write!(f, "exists"),
            CommandKind::UpdateConfig => write!(f, "update-config"),
            CommandKind::Mutate(cmd) => write!(f, "{}", cmd.as_str()),
        }
    }
}

/// A validated request for one protocol run against one stack
#[derive(Clone, Debug)]
pub struct CommandRequest {
    pub kind: CommandKind,
    pub stack: StackIdentity,
    /// Arguments passed through verbatim to mutate commands
    pub raw_args: Vec<String>,
}

impl CommandRequest {
    pub fn parse(
        command: &str,
        stack: StackIdentity,
        raw_args: Vec<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            kind: CommandKind::parse(command)?,
            stack,
            raw_args,
        })
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;

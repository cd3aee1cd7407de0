// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the stack lock engine

use sl_adapters::{IdentityError, StoreError, ToolError, VaultError};
use sl_core::ValidationError;
use thiserror::Error;

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("authentication failed: {0}")]
    Credential(String),

    #[error("lock '{blob}' is unavailable: {reason}")]
    LockUnavailable { blob: String, reason: String },

    #[error("secret '{name}' not found in vault '{vault}'")]
    SecretNotFound { vault: String, name: String },

    #[error("secret '{name}' in vault '{vault}' did not read back as written")]
    SecretWriteVerificationFailed { vault: String, name: String },

    #[error("'{command_line}' failed with exit code {exit_code}")]
    ToolInvocationFailed { exit_code: i32, command_line: String },

    #[error("unsupported command: '{0}'")]
    UnsupportedCommand(String),

    #[error("invalid stack name '{name}': must start with a letter and contain only {allowed}")]
    InvalidStackName { name: String, allowed: &'static str },

    #[error("invalid secret name '{0}': must be 1-127 letters, digits or dashes")]
    InvalidSecretName(String),

    #[error("tool version mismatch: requested {requested}, installed {installed}")]
    ToolVersionMismatch { requested: String, installed: String },

    #[error("missing required input: {0}")]
    MissingInput(&'static str),

    #[error("invalid variable prefix '{0}': must not be empty")]
    InvalidPrefix(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("vault error: {0}")]
    Vault(#[from] VaultError),

    #[error("tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        EngineError::Io {
            context: context.into(),
            source,
        }
    }
}

impl From<ValidationError> for EngineError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::InvalidStackName { name, allowed } => {
                EngineError::InvalidStackName { name, allowed }
            }
            ValidationError::InvalidSecretName(name) => EngineError::InvalidSecretName(name),
            ValidationError::UnsupportedCommand(raw) => EngineError::UnsupportedCommand(raw),
            ValidationError::MissingInput(input) => EngineError::MissingInput(input),
            ValidationError::InvalidPrefix(prefix) => EngineError::InvalidPrefix(prefix),
            ValidationError::ToolVersionMismatch {
                requested,
                installed,
            } => EngineError::ToolVersionMismatch {
                requested,
                installed,
            },
        }
    }
}

impl From<IdentityError> for EngineError {
    fn from(e: IdentityError) -> Self {
        EngineError::Credential(e.to_string())
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation errors raised before any remote call is made

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(
        "invalid stack name '{name}': must start with a letter and contain only {allowed}"
    )]
    InvalidStackName { name: String, allowed: &'static str },

    #[error("invalid secret name '{0}': must be 1-127 letters, digits or dashes")]
    InvalidSecretName(String),

    #[error("unsupported command: '{0}'")]
    UnsupportedCommand(String),

    #[error("missing required input: {0}")]
    MissingInput(&'static str),

    #[error("invalid variable prefix '{0}': must not be empty")]
    InvalidPrefix(String),

    #[error("tool version mismatch: requested {requested}, installed {installed}")]
    ToolVersionMismatch { requested: String, installed: String },
}

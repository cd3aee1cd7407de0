// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Each error shows what went wrong, why it might have happened and how
//! to fix it.

use sl_engine::EngineError;
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {}

impl From<&EngineError> for CliError {
    fn from(err: &EngineError) -> Self {
        let base = CliError::new(err.to_string());
        match err {
            EngineError::LockUnavailable { blob, .. } => base
                .with_context("Another run holds the lease, or the lock object does not exist")
                .with_context("Leases never expire: a crashed run keeps the lock held")
                .with_suggestion("Wait for the other run to finish, then re-run")
                .with_suggestion(format!(
                    "If no run is active, break the lease: az storage blob lease break \
                     --blob-name {} --container-name <container> --account-name <account>",
                    blob
                ))
                .with_suggestion("If the stack was never initialized: stacklock init"),
            EngineError::SecretNotFound { .. } => base
                .with_context("The stack's passphrase is created by init")
                .with_suggestion("Initialize the stack first: stacklock init")
                .with_suggestion("Check --secret-name matches the name used at init"),
            EngineError::SecretWriteVerificationFailed { .. } => base
                .with_context("The passphrase read back differs from the one written")
                .with_suggestion("Check for another process writing the same secret")
                .with_suggestion("Re-run init once no other run is active"),
            EngineError::ToolInvocationFailed { exit_code, .. } => base
                .with_context(format!("The tool exited with code {}", exit_code))
                .with_suggestion("Review the tool output above"),
            EngineError::UnsupportedCommand(_) => base.with_suggestion(
                "Use one of: init, exists, update-config, preview, up, destroy, refresh, \
                 import, cancel",
            ),
            EngineError::InvalidStackName { .. } => base
                .with_suggestion("Start with a letter; use letters, digits and dashes")
                .with_suggestion("Pass --allow-periods to also allow periods"),
            EngineError::InvalidSecretName(_) => base
                .with_context("The passphrase secret name defaults to the stack name")
                .with_suggestion("Pass --secret-name without periods or underscores"),
            EngineError::ToolVersionMismatch { .. } => base
                .with_context("An earlier step of this pipeline installed a different version")
                .with_suggestion("Use the same --tool-version in every step"),
            EngineError::Credential(_) => base
                .with_context("The service principal could not authenticate")
                .with_suggestion(
                    "Check ARM_CLIENT_ID, ARM_CLIENT_SECRET, ARM_TENANT_ID and ARM_SUBSCRIPTION_ID",
                ),
            EngineError::InvalidPrefix(_) => base
                .with_context("A blank prefix would copy every environment variable into stack config")
                .with_suggestion("Pass a non-empty --prefix such as CFG_, or drop the flag"),
            EngineError::MissingInput(_) => base
                .with_suggestion("Pass it as a flag, a STACKLOCK_* variable or in stacklock.toml"),
            _ => base,
        }
    }
}

/// Render any run failure for the terminal
pub fn render(err: &anyhow::Error) -> CliError {
    match err.downcast_ref::<EngineError>() {
        Some(engine) => CliError::from(engine),
        None => CliError::new(format!("{:#}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::new("Something went wrong")
            .with_context("First context")
            .with_suggestion("Try this")
            .with_suggestion("Or this");

        let output = format!("{}", err);
        assert!(output.contains("error: Something went wrong"));
        assert!(output.contains("-> First context"));
        assert!(output.contains("1. Try this"));
        assert!(output.contains("2. Or this"));
    }

    #[test]
    fn test_lock_unavailable_suggests_breaking_lease() {
        let err = anyhow::Error::from(EngineError::LockUnavailable {
            blob: "state-locks/demo-1.lock".into(),
            reason: "lease already present".into(),
        });
        let output = render(&err).to_string();
        assert!(output.contains("state-locks/demo-1.lock"));
        assert!(output.contains("az storage blob lease break"));
    }

    #[test]
    fn test_other_errors_render_chain() {
        let err = anyhow::anyhow!("inner").context("outer");
        assert_eq!(render(&err).message, "outer: inner");
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stack identity and name validation

use crate::error::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Which characters a stack name may contain after its leading letter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackNameRule {
    /// Letters, digits and dashes
    #[default]
    Strict,
    /// Letters, digits, dashes and periods
    AllowPeriods,
}

impl StackNameRule {
    fn regex(self) -> &'static Regex {
        static STRICT: OnceLock<Regex> = OnceLock::new();
        static PERIODS: OnceLock<Regex> = OnceLock::new();
        match self {
            StackNameRule::Strict => STRICT.get_or_init(|| build(r"^[A-Za-z][A-Za-z0-9-]+$")),
            StackNameRule::AllowPeriods => {
                PERIODS.get_or_init(|| build(r"^[A-Za-z][A-Za-z0-9.-]+$"))
            }
        }
    }

    fn allowed(self) -> &'static str {
        match self {
            StackNameRule::Strict => "letters, digits or dashes",
            StackNameRule::AllowPeriods => "letters, digits, dashes or periods",
        }
    }
}

/// Key Vault secret names: letters, digits and dashes
fn secret_name_regex() -> &'static Regex {
    static SECRET: OnceLock<Regex> = OnceLock::new();
    SECRET.get_or_init(|| build(r"^[0-9A-Za-z-]{1,127}$"))
}

// Patterns are literals exercised by stack_tests
#[allow(clippy::expect_used)]
fn build(pattern: &str) -> Regex {
    Regex::new(pattern).expect("stack name pattern is valid")
}

/// Names a stack, the secret holding its passphrase and the vault storing that secret
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackIdentity {
    pub stack_name: String,
    pub secret_name: String,
    pub vault_name: String,
}

impl StackIdentity {
    /// Validate `stack_name` and build an identity.
    ///
    /// `secret_name` falls back to the stack name when not given, and must be
    /// a valid vault secret name either way.
    pub fn new(
        stack_name: impl Into<String>,
        secret_name: Option<String>,
        vault_name: impl Into<String>,
        rule: StackNameRule,
    ) -> Result<Self, ValidationError> {
        let stack_name = stack_name.into();
        validate_stack_name(&stack_name, rule)?;
        let secret_name = secret_name
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| stack_name.clone());
        if !secret_name_regex().is_match(&secret_name) {
            return Err(ValidationError::InvalidSecretName(secret_name));
        }
        Ok(Self {
            stack_name,
            secret_name,
            vault_name: vault_name.into(),
        })
    }

    /// Human-readable description stored alongside the passphrase secret
    pub fn passphrase_description(&self) -> String {
        format!("passphrase for pulumi stack: {}", self.stack_name)
    }
}

pub fn validate_stack_name(name: &str, rule: StackNameRule) -> Result<(), ValidationError> {
    if rule.regex().is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidStackName {
            name: name.to_string(),
            allowed: rule.allowed(),
        })
    }
}

#[cfg(test)]
#[path = "stack_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External variables and the config entries derived from them

use crate::error::ValidationError;
use std::fmt;

/// A key/value pair supplied by the invoking automation environment
#[derive(Clone, PartialEq, Eq)]
pub struct ExternalVariable {
    pub name: String,
    pub value: String,
    pub is_secret: bool,
}

impl ExternalVariable {
    pub fn plain(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_secret: false,
        }
    }

    pub fn secret(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_secret: true,
        }
    }
}

impl fmt::Debug for ExternalVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value: &dyn fmt::Debug = if self.is_secret { &"***" } else { &self.value };
        f.debug_struct("ExternalVariable")
            .field("name", &self.name)
            .field("value", value)
            .field("is_secret", &self.is_secret)
            .finish()
    }
}

/// Desired stack config value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub is_secret: bool,
}

/// Reject blank prefixes, which would select every variable in the environment
pub fn validate_prefixes(prefixes: &[String]) -> Result<(), ValidationError> {
    match prefixes.iter().find(|p| p.trim().is_empty()) {
        Some(blank) => Err(ValidationError::InvalidPrefix(blank.clone())),
        None => Ok(()),
    }
}

/// Select variables whose name starts with `prefix` (ASCII case-insensitive).
///
/// The key is the name with the prefix stripped, unless `include_prefix` is set.
/// A variable equal to the bare prefix yields no entry when stripping.
/// A blank prefix selects nothing.
pub fn select_prefixed(
    vars: &[ExternalVariable],
    prefix: &str,
    include_prefix: bool,
) -> Vec<ConfigEntry> {
    if prefix.trim().is_empty() {
        return Vec::new();
    }
    vars.iter()
        .filter_map(|var| {
            let head = var.name.get(..prefix.len())?;
            if !head.eq_ignore_ascii_case(prefix) {
                return None;
            }
            let key = if include_prefix {
                var.name.clone()
            } else {
                var.name[prefix.len()..].to_string()
            };
            if key.is_empty() {
                return None;
            }
            Some(ConfigEntry {
                key,
                value: var.value.clone(),
                is_secret: var.is_secret,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "variable_tests.rs"]
mod tests;

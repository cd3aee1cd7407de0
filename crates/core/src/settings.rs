// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-based settings merged with command-line inputs

use crate::error::ValidationError;
use crate::stack::StackNameRule;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "stacklock.toml";
pub const DEFAULT_TOOL: &str = "pulumi";
pub const DEFAULT_EXISTS_VARIABLE: &str = "STACK_EXISTS";
pub const DEFAULT_CONFIG_STATUS_VARIABLE: &str = "CONFIG_CHANGE_STATUS";
pub const DEFAULT_INSTALLED_VERSION_VARIABLE: &str = "INSTALLED_PULUMI_VERSION";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Every input the coordinator needs, each optional so file values and
/// command-line values can be layered.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub stack: Option<String>,
    pub secret_name: Option<String>,
    pub storage_account: Option<String>,
    pub container: Option<String>,
    pub key_vault: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub tool: Option<PathBuf>,
    pub tool_version: Option<String>,
    pub stack_name_rule: Option<StackNameRule>,
    pub output_file: Option<PathBuf>,
    pub reconcile: ReconcileSettings,
    pub variables: VariableNames,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcileSettings {
    pub prefixes: Vec<String>,
    pub include_prefix: Option<bool>,
}

/// Names of the pipeline variables results are written back to
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct VariableNames {
    pub exists: Option<String>,
    pub config_status: Option<String>,
    pub installed_version: Option<String>,
}

impl VariableNames {
    pub fn exists(&self) -> &str {
        self.exists.as_deref().unwrap_or(DEFAULT_EXISTS_VARIABLE)
    }

    pub fn config_status(&self) -> &str {
        self.config_status
            .as_deref()
            .unwrap_or(DEFAULT_CONFIG_STATUS_VARIABLE)
    }

    pub fn installed_version(&self) -> &str {
        self.installed_version
            .as_deref()
            .unwrap_or(DEFAULT_INSTALLED_VERSION_VARIABLE)
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, else `stacklock.toml` in `dir` when present, else defaults.
    ///
    /// An explicitly named file must exist; the implicit one is optional.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let implicit = dir.join(DEFAULT_SETTINGS_FILE);
                if implicit.is_file() {
                    Self::load(&implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Layer `overrides` on top of `self`; set values in `overrides` win.
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            stack: overrides.stack.or(self.stack),
            secret_name: overrides.secret_name.or(self.secret_name),
            storage_account: overrides.storage_account.or(self.storage_account),
            container: overrides.container.or(self.container),
            key_vault: overrides.key_vault.or(self.key_vault),
            working_dir: overrides.working_dir.or(self.working_dir),
            tool: overrides.tool.or(self.tool),
            tool_version: overrides.tool_version.or(self.tool_version),
            stack_name_rule: overrides.stack_name_rule.or(self.stack_name_rule),
            output_file: overrides.output_file.or(self.output_file),
            reconcile: ReconcileSettings {
                prefixes: if overrides.reconcile.prefixes.is_empty() {
                    self.reconcile.prefixes
                } else {
                    overrides.reconcile.prefixes
                },
                include_prefix: overrides
                    .reconcile
                    .include_prefix
                    .or(self.reconcile.include_prefix),
            },
            variables: VariableNames {
                exists: overrides.variables.exists.or(self.variables.exists),
                config_status: overrides
                    .variables
                    .config_status
                    .or(self.variables.config_status),
                installed_version: overrides
                    .variables
                    .installed_version
                    .or(self.variables.installed_version),
            },
        }
    }

    pub fn require_stack(&self) -> Result<&str, ValidationError> {
        required(&self.stack, "stack")
    }

    pub fn require_storage_account(&self) -> Result<&str, ValidationError> {
        required(&self.storage_account, "storage account")
    }

    pub fn require_container(&self) -> Result<&str, ValidationError> {
        required(&self.container, "container")
    }

    pub fn require_key_vault(&self) -> Result<&str, ValidationError> {
        required(&self.key_vault, "key vault")
    }

    pub fn tool(&self) -> PathBuf {
        self.tool
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOOL))
    }

    pub fn working_dir(&self) -> PathBuf {
        self.working_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn stack_name_rule(&self) -> StackNameRule {
        self.stack_name_rule.unwrap_or_default()
    }

    pub fn include_prefix(&self) -> bool {
        self.reconcile.include_prefix.unwrap_or(false)
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, ValidationError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingInput(name))
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drift reconciliation between external variables and stored stack config

use crate::error::EngineError;
use crate::tool::{StackTool, ToolEnv};
use sl_adapters::ToolRunner;
use sl_core::{select_prefixed, validate_prefixes, ExternalVariable};

pub const SOME_CHANGE: &str = "some_change";
pub const NO_CHANGE: &str = "no_change";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub any_changed: bool,
}

impl ReconcileOutcome {
    /// `"some_change"` or `"no_change"`
    pub fn status(&self) -> &'static str {
        if self.any_changed {
            SOME_CHANGE
        } else {
            NO_CHANGE
        }
    }
}

/// Writes only the config values that differ from what the stack stores
pub struct ConfigReconciler<'a, T> {
    tool: &'a StackTool<T>,
    env: &'a ToolEnv,
    variables: &'a [ExternalVariable],
}

impl<'a, T: ToolRunner> ConfigReconciler<'a, T> {
    pub fn new(tool: &'a StackTool<T>, env: &'a ToolEnv, variables: &'a [ExternalVariable]) -> Self {
        Self {
            tool,
            env,
            variables,
        }
    }

    pub async fn reconcile(
        &self,
        prefixes: &[String],
        include_prefix: bool,
    ) -> Result<ReconcileOutcome, EngineError> {
        validate_prefixes(prefixes)?;
        let mut outcome = ReconcileOutcome::default();
        for prefix in prefixes {
            for entry in select_prefixed(self.variables, prefix, include_prefix) {
                let current = self.tool.config_get(&entry.key, self.env).await?;
                if current.as_deref() == Some(entry.value.as_str()) {
                    tracing::debug!(key = %entry.key, "unchanged");
                    continue;
                }
                self.tool.config_set(&entry, self.env).await?;
                tracing::info!(key = %entry.key, secret = entry.is_secret, "config updated");
                outcome.any_changed = true;
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;

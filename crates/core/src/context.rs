// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit per-run state threaded through every protocol

use crate::error::ValidationError;
use std::collections::BTreeMap;
use uuid::Uuid;

/// State owned by a single run of the coordinator.
///
/// Nothing here is process-global: two contexts in one process are fully
/// independent, which is what lets tests run racing coordinators side by side.
#[derive(Clone, Debug)]
pub struct RunContext {
    pub run_id: Uuid,
    requested_tool_version: Option<String>,
    installed_tool_version: Option<String>,
    tool_env: BTreeMap<String, String>,
}

impl RunContext {
    /// `requested` of `None`, empty or `latest` places no constraint on the tool version.
    pub fn new(requested: Option<String>) -> Self {
        let requested = requested
            .map(|v| normalize_version(&v))
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("latest"));
        Self {
            run_id: Uuid::new_v4(),
            requested_tool_version: requested,
            installed_tool_version: None,
            tool_env: BTreeMap::new(),
        }
    }

    /// Seed the version an earlier step of the same pipeline reported as installed
    pub fn with_installed_version(mut self, installed: Option<String>) -> Self {
        self.installed_tool_version = installed
            .map(|v| normalize_version(&v))
            .filter(|v| !v.is_empty());
        self
    }

    pub fn requested_tool_version(&self) -> Option<&str> {
        self.requested_tool_version.as_deref()
    }

    pub fn installed_tool_version(&self) -> Option<&str> {
        self.installed_tool_version.as_deref()
    }

    /// Record the version the tool reports and check it against the request
    /// and against any version recorded earlier in the run.
    pub fn record_installed_version(&mut self, reported: &str) -> Result<(), ValidationError> {
        let reported = normalize_version(reported);
        if let Some(requested) = &self.requested_tool_version {
            if let Some(previous) = &self.installed_tool_version {
                if previous != requested {
                    return Err(ValidationError::ToolVersionMismatch {
                        requested: requested.clone(),
                        installed: previous.clone(),
                    });
                }
            }
            if &reported != requested {
                return Err(ValidationError::ToolVersionMismatch {
                    requested: requested.clone(),
                    installed: reported,
                });
            }
        }
        self.installed_tool_version = Some(reported);
        Ok(())
    }

    pub fn extend_env(&mut self, entries: impl IntoIterator<Item = (String, String)>) {
        self.tool_env.extend(entries);
    }

    pub fn tool_env(&self) -> &BTreeMap<String, String> {
        &self.tool_env
    }
}

fn normalize_version(v: &str) -> String {
    let v = v.trim();
    v.strip_prefix('v').unwrap_or(v).to_string()
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

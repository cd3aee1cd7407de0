// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake variable source and recording sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{VariableSink, VariableSource};
use sl_core::ExternalVariable;
use std::sync::{Arc, Mutex};

/// Fixed list of variables
#[derive(Clone, Debug, Default)]
pub struct FakeVariableSource {
    vars: Vec<ExternalVariable>,
}

impl FakeVariableSource {
    pub fn new(vars: Vec<ExternalVariable>) -> Self {
        Self { vars }
    }
}

impl VariableSource for FakeVariableSource {
    fn variables(&self) -> Vec<ExternalVariable> {
        self.vars.clone()
    }
}

/// Records every variable written; clones share state
#[derive(Clone, Default)]
pub struct RecordingVariableSink {
    written: Arc<Mutex<Vec<ExternalVariable>>>,
}

impl RecordingVariableSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn written(&self) -> Vec<ExternalVariable> {
        self.lock().clone()
    }

    /// Last value written under `name`
    pub fn value(&self, name: &str) -> Option<String> {
        self.lock()
            .iter()
            .rev()
            .find(|v| v.name == name)
            .map(|v| v.value.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ExternalVariable>> {
        self.written.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl VariableSink for RecordingVariableSink {
    fn set_variable(&self, name: &str, value: &str, is_secret: bool) -> std::io::Result<()> {
        self.lock().push(ExternalVariable {
            name: name.to_string(),
            value: value.to_string(),
            is_secret,
        });
        Ok(())
    }
}

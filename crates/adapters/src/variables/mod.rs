// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The invoking environment's variable namespace: inputs read from it,
//! results written back to it

mod env;
mod pipeline;

pub use env::{EnvVariableSource, SECRET_PREFIX};
pub use pipeline::PipelineVariableSink;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeVariableSource, RecordingVariableSink};

use sl_core::ExternalVariable;

/// Source of externally supplied variables
pub trait VariableSource: Send + Sync {
    fn variables(&self) -> Vec<ExternalVariable>;

    /// Value of a single variable, if present and non-empty
    fn get(&self, name: &str) -> Option<String> {
        self.variables()
            .into_iter()
            .find(|v| v.name == name && !v.value.is_empty())
            .map(|v| v.value)
    }
}

/// Destination for run results
pub trait VariableSink: Send + Sync {
    fn set_variable(&self, name: &str, value: &str, is_secret: bool) -> std::io::Result<()>;
}

impl<T: VariableSink + ?Sized> VariableSink for &T {
    fn set_variable(&self, name: &str, value: &str, is_secret: bool) -> std::io::Result<()> {
        (**self).set_variable(name, value, is_secret)
    }
}

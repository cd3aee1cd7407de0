// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What to do when a placeholder object already exists

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExistencePolicy {
    /// Conditional create; an existing object is an error
    ErrorIfExists,
    /// Conditional create; an existing object counts as success
    DoNothingIfExists,
    /// Unconditional write
    OverwriteIfExists,
}

impl ExistencePolicy {
    /// Whether the store write must refuse to replace an existing object
    pub fn is_conditional(self) -> bool {
        !matches!(self, ExistencePolicy::OverwriteIfExists)
    }
}

impl fmt::Display for ExistencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExistencePolicy::ErrorIfExists => "error-if-exists",
            ExistencePolicy::DoNothingIfExists => "do-nothing-if-exists",
            ExistencePolicy::OverwriteIfExists => "overwrite-if-exists",
        };
        write!(f, "{}", s)
    }
}

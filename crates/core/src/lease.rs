// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lease handles for remote lock objects

/// Proof of an exclusive lease on a remote object.
///
/// Produced by an acquire and consumed by exactly one release. It is neither
/// `Clone` nor serializable: the lease token never leaves this process.
#[derive(Debug, PartialEq, Eq)]
pub struct LockHandle {
    blob_name: String,
    lease_token: String,
}

impl LockHandle {
    pub fn new(blob_name: impl Into<String>, lease_token: impl Into<String>) -> Self {
        Self {
            blob_name: blob_name.into(),
            lease_token: lease_token.into(),
        }
    }

    pub fn blob_name(&self) -> &str {
        &self.blob_name
    }

    pub fn lease_token(&self) -> &str {
        &self.lease_token
    }
}

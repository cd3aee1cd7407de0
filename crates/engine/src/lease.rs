// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exclusive leases on remote lock objects

use crate::error::EngineError;
use sl_adapters::{BlobStore, StoreError};
use sl_core::LockHandle;
use std::future::Future;

/// Acquires and releases unbounded leases.
///
/// One request per call: no polling, no backoff, no waiting for a holder to
/// let go.
#[derive(Clone)]
pub struct LeaseLockManager<S> {
    store: S,
}

impl<S: BlobStore> LeaseLockManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lease an existing object. A missing or already-leased object is
    /// [`EngineError::LockUnavailable`].
    pub async fn acquire(&self, blob: &str) -> Result<LockHandle, EngineError> {
        match self.store.acquire_lease(blob).await {
            Ok(token) => {
                tracing::debug!(blob, "lock held");
                Ok(LockHandle::new(blob, token))
            }
            Err(e) if e.category().is_some_and(|c| c.means_lease_unavailable()) => {
                Err(EngineError::LockUnavailable {
                    blob: blob.to_string(),
                    reason: e.to_string(),
                })
            }
            Err(e @ StoreError::MissingLeaseId(_)) => Err(EngineError::LockUnavailable {
                blob: blob.to_string(),
                reason: e.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Release a lease. Failures are logged and swallowed so they never mask
    /// an error the caller is already returning.
    pub async fn release(&self, handle: LockHandle) {
        let blob = handle.blob_name();
        match self.store.release_lease(blob, handle.lease_token()).await {
            Ok(()) => tracing::debug!(blob, "lock released"),
            Err(e) => tracing::warn!(
                blob,
                error = %e,
                "failed to release lock; it stays held until broken manually"
            ),
        }
    }

    /// Run `body` while holding a lease on `blob`.
    ///
    /// The lease is released after `body` finishes, whatever its result;
    /// `body`'s result is returned unchanged. If the lease cannot be taken
    /// `body` never runs.
    pub async fn with_lease<T, F>(&self, blob: &str, body: F) -> Result<T, EngineError>
    where
        F: Future<Output = Result<T, EngineError>>,
    {
        let handle = self.acquire(blob).await?;
        let result = body.await;
        self.release(handle).await;
        result
    }
}

#[cfg(test)]
#[path = "lease_tests.rs"]
mod tests;

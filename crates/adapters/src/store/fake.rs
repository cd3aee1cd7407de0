// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake blob store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{BlobStore, ErrorCategory, StoreError, WriteMode};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Store operation, used to target injected failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Exists,
    Put,
    AcquireLease,
    ReleaseLease,
}

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Exists { blob: String },
    Put { blob: String, mode: WriteMode },
    AcquireLease { blob: String },
    ReleaseLease { blob: String, lease_id: String },
}

#[derive(Debug, Clone)]
struct FakeBlob {
    content: Vec<u8>,
    lease: Option<String>,
}

#[derive(Default)]
struct FakeStoreState {
    blobs: HashMap<String, FakeBlob>,
    calls: Vec<StoreCall>,
    next_lease: u64,
    failures: HashMap<StoreOp, (u16, ErrorCategory)>,
}

/// In-memory blob store with lease semantics matching the real service.
///
/// Clones share state, so several coordinators built over clones of one fake
/// behave like separate processes contending on the same container. Every
/// operation yields once after taking effect to let racing tasks interleave.
#[derive(Clone, Default)]
pub struct FakeBlobStore {
    state: Arc<Mutex<FakeStoreState>>,
}

impl FakeBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Seed an object
    pub fn insert(&self, blob: &str, content: &[u8]) {
        self.lock().blobs.insert(
            blob.to_string(),
            FakeBlob {
                content: content.to_vec(),
                lease: None,
            },
        );
    }

    pub fn content(&self, blob: &str) -> Option<Vec<u8>> {
        self.lock().blobs.get(blob).map(|b| b.content.clone())
    }

    pub fn contains(&self, blob: &str) -> bool {
        self.lock().blobs.contains_key(blob)
    }

    pub fn blob_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().blobs.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_leased(&self, blob: &str) -> bool {
        self.lock()
            .blobs
            .get(blob)
            .is_some_and(|b| b.lease.is_some())
    }

    /// Make every subsequent call of `op` fail with the given response
    pub fn fail(&self, op: StoreOp, status: u16, category: ErrorCategory) {
        self.lock().failures.insert(op, (status, category));
    }

    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeStoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn injected(
        state: &FakeStoreState,
        op: StoreOp,
        operation: &'static str,
        blob: &str,
    ) -> Result<(), StoreError> {
        match state.failures.get(&op) {
            Some((status, category)) => Err(service(operation, blob, *status, category.clone())),
            None => Ok(()),
        }
    }

    fn exists_now(&self, blob: &str) -> Result<bool, StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Exists {
            blob: blob.to_string(),
        });
        Self::injected(&state, StoreOp::Exists, "head", blob)?;
        Ok(state.blobs.contains_key(blob))
    }

    fn put_now(&self, blob: &str, content: Vec<u8>, mode: WriteMode) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Put {
            blob: blob.to_string(),
            mode,
        });
        Self::injected(&state, StoreOp::Put, "put", blob)?;

        match state.blobs.get_mut(blob) {
            Some(_) if mode == WriteMode::CreateOnly => Err(service(
                "put",
                blob,
                409,
                ErrorCategory::BlobAlreadyExists,
            )),
            Some(existing) if existing.lease.is_some() => {
                Err(service("put", blob, 412, ErrorCategory::LeaseIdMissing))
            }
            Some(existing) => {
                existing.content = content;
                Ok(())
            }
            None => {
                state.blobs.insert(
                    blob.to_string(),
                    FakeBlob {
                        content,
                        lease: None,
                    },
                );
                Ok(())
            }
        }
    }

    fn acquire_now(&self, blob: &str) -> Result<String, StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::AcquireLease {
            blob: blob.to_string(),
        });
        Self::injected(&state, StoreOp::AcquireLease, "lease acquire", blob)?;

        state.next_lease += 1;
        let lease_id = format!("lease-{}", state.next_lease);
        match state.blobs.get_mut(blob) {
            None => Err(service("lease acquire", blob, 404, ErrorCategory::BlobNotFound)),
            Some(existing) if existing.lease.is_some() => Err(service(
                "lease acquire",
                blob,
                409,
                ErrorCategory::LeaseAlreadyPresent,
            )),
            Some(existing) => {
                existing.lease = Some(lease_id.clone());
                Ok(lease_id)
            }
        }
    }

    fn release_now(&self, blob: &str, lease_id: &str) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::ReleaseLease {
            blob: blob.to_string(),
            lease_id: lease_id.to_string(),
        });
        Self::injected(&state, StoreOp::ReleaseLease, "lease release", blob)?;

        match state.blobs.get_mut(blob) {
            None => Err(service("lease release", blob, 404, ErrorCategory::BlobNotFound)),
            Some(existing) => match &existing.lease {
                Some(current) if current == lease_id => {
                    existing.lease = None;
                    Ok(())
                }
                Some(_) => Err(service(
                    "lease release",
                    blob,
                    409,
                    ErrorCategory::LeaseIdMismatch,
                )),
                None => Err(service(
                    "lease release",
                    blob,
                    409,
                    ErrorCategory::LeaseNotPresent,
                )),
            },
        }
    }
}

fn service(operation: &'static str, blob: &str, status: u16, category: ErrorCategory) -> StoreError {
    StoreError::Service {
        operation,
        blob: blob.to_string(),
        status,
        category,
    }
}

#[async_trait]
impl BlobStore for FakeBlobStore {
    async fn exists(&self, blob: &str) -> Result<bool, StoreError> {
        let result = self.exists_now(blob);
        tokio::task::yield_now().await;
        result
    }

    async fn put(&self, blob: &str, content: Vec<u8>, mode: WriteMode) -> Result<(), StoreError> {
        let result = self.put_now(blob, content, mode);
        tokio::task::yield_now().await;
        result
    }

    async fn acquire_lease(&self, blob: &str) -> Result<String, StoreError> {
        let result = self.acquire_now(blob);
        tokio::task::yield_now().await;
        result
    }

    async fn release_lease(&self, blob: &str, lease_id: &str) -> Result<(), StoreError> {
        let result = self.release_now(blob, lease_id);
        tokio::task::yield_now().await;
        result
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

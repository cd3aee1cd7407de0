// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake secret store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{SecretStore, VaultError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded vault call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultCall {
    Get { vault: String, name: String },
    Set { vault: String, name: String, description: String },
}

#[derive(Default)]
struct FakeVaultState {
    secrets: HashMap<(String, String), String>,
    calls: Vec<VaultCall>,
    corrupt_writes: bool,
    fail_reads: bool,
}

/// In-memory secret store; clones share state
#[derive(Clone, Default)]
pub struct FakeSecretStore {
    state: Arc<Mutex<FakeVaultState>>,
}

impl FakeSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<VaultCall> {
        self.lock().calls.clone()
    }

    pub fn insert(&self, vault: &str, name: &str, value: &str) {
        self.lock()
            .secrets
            .insert((vault.to_string(), name.to_string()), value.to_string());
    }

    pub fn get(&self, vault: &str, name: &str) -> Option<String> {
        self.lock()
            .secrets
            .get(&(vault.to_string(), name.to_string()))
            .cloned()
    }

    pub fn secret_count(&self) -> usize {
        self.lock().secrets.len()
    }

    pub fn write_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, VaultCall::Set { .. }))
            .count()
    }

    /// Store something other than the written value, as a lossy store would
    pub fn corrupt_writes(&self) {
        self.lock().corrupt_writes = true;
    }

    /// Fail every read with a service error
    pub fn fail_reads(&self) {
        self.lock().fail_reads = true;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeVaultState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SecretStore for FakeSecretStore {
    async fn get_secret(&self, vault: &str, name: &str) -> Result<Option<String>, VaultError> {
        let result = {
            let mut state = self.lock();
            state.calls.push(VaultCall::Get {
                vault: vault.to_string(),
                name: name.to_string(),
            });
            if state.fail_reads {
                Err(VaultError::Service {
                    operation: "get",
                    vault: vault.to_string(),
                    name: name.to_string(),
                    status: 403,
                    code: "Forbidden".to_string(),
                })
            } else {
                Ok(state
                    .secrets
                    .get(&(vault.to_string(), name.to_string()))
                    .filter(|v| !v.is_empty())
                    .cloned())
            }
        };
        tokio::task::yield_now().await;
        result
    }

    async fn set_secret(
        &self,
        vault: &str,
        name: &str,
        value: &str,
        description: &str,
    ) -> Result<(), VaultError> {
        {
            let mut state = self.lock();
            state.calls.push(VaultCall::Set {
                vault: vault.to_string(),
                name: name.to_string(),
                description: description.to_string(),
            });
            let stored = if state.corrupt_writes {
                format!("{}-corrupted", value)
            } else {
                value.to_string()
            };
            state
                .secrets
                .insert((vault.to_string(), name.to_string()), stored);
        }
        tokio::task::yield_now().await;
        Ok(())
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake cloud identity for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CloudIdentity, IdentityError};
use async_trait::async_trait;
use sl_core::ServiceIdentity;
use std::sync::{Arc, Mutex};

/// Recorded identity call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityCall {
    Login { client_id: String },
    StorageAccountKey { account: String },
    AccessToken { resource: String },
}

struct FakeIdentityState {
    storage_key: String,
    token: String,
    fail_login: bool,
    calls: Vec<IdentityCall>,
}

/// Fake identity returning fixed credentials
#[derive(Clone)]
pub struct FakeCloudIdentity {
    state: Arc<Mutex<FakeIdentityState>>,
}

impl Default for FakeCloudIdentity {
    fn default() -> Self {
        Self::new("ZmFrZS1zdG9yYWdlLWtleQ==")
    }
}

impl FakeCloudIdentity {
    pub fn new(storage_key: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeIdentityState {
                storage_key: storage_key.to_string(),
                token: "fake-token".to_string(),
                fail_login: false,
                calls: Vec::new(),
            })),
        }
    }

    pub fn fail_login(&self) {
        self.lock().fail_login = true;
    }

    pub fn calls(&self) -> Vec<IdentityCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeIdentityState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl CloudIdentity for FakeCloudIdentity {
    async fn login(&self, identity: &ServiceIdentity) -> Result<(), IdentityError> {
        let mut state = self.lock();
        state.calls.push(IdentityCall::Login {
            client_id: identity.client_id().to_string(),
        });
        if state.fail_login {
            return Err(IdentityError::Failed {
                command: "az login --service-principal".to_string(),
                exit_code: 1,
                stderr: "AADSTS7000215: Invalid client secret provided.".to_string(),
            });
        }
        Ok(())
    }

    async fn storage_account_key(&self, account: &str) -> Result<String, IdentityError> {
        let mut state = self.lock();
        state.calls.push(IdentityCall::StorageAccountKey {
            account: account.to_string(),
        });
        Ok(state.storage_key.clone())
    }

    async fn access_token(&self, resource: &str) -> Result<String, IdentityError> {
        let mut state = self.lock();
        state.calls.push(IdentityCall::AccessToken {
            resource: resource.to_string(),
        });
        Ok(state.token.clone())
    }
}

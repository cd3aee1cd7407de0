// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cloud identity adapters

mod az;

pub use az::AzCliIdentity;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeCloudIdentity, IdentityCall};

use async_trait::async_trait;
use sl_core::ServiceIdentity;
use thiserror::Error;

/// Errors from cloud identity operations
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("failed to run '{program}': {message}")]
    Spawn { program: String, message: String },
    #[error("'{command}' failed with exit code {exit_code}: {stderr}")]
    Failed {
        command: String,
        exit_code: i32,
        stderr: String,
    },
    #[error("'{0}' returned no value")]
    EmptyOutput(String),
}

/// Adapter for authenticating against the cloud and fetching derived credentials
#[async_trait]
pub trait CloudIdentity: Clone + Send + Sync + 'static {
    /// Authenticate as the service principal and select its subscription
    async fn login(&self, identity: &ServiceIdentity) -> Result<(), IdentityError>;

    /// Primary access key for a storage account
    async fn storage_account_key(&self, account: &str) -> Result<String, IdentityError>;

    /// Bearer token for a resource such as `https://vault.azure.net`
    async fn access_token(&self, resource: &str) -> Result<String, IdentityError>;
}

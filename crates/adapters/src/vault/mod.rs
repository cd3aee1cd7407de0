// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Secret store adapters

mod keyvault;

pub use keyvault::{KeyVaultStore, VAULT_RESOURCE};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSecretStore, VaultCall};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from secret store operations
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("{operation} secret '{name}' in vault '{vault}' failed with status {status} ({code})")]
    Service {
        operation: &'static str,
        vault: String,
        name: String,
        status: u16,
        code: String,
    },
    #[error("{operation} secret '{name}' in vault '{vault}' failed: {message}")]
    Transport {
        operation: &'static str,
        vault: String,
        name: String,
        message: String,
    },
}

/// Adapter for the vault holding stack passphrases
#[async_trait]
pub trait SecretStore: Clone + Send + Sync + 'static {
    /// Read a secret; `None` when it does not exist
    async fn get_secret(&self, vault: &str, name: &str) -> Result<Option<String>, VaultError>;

    /// Create or replace a secret
    async fn set_secret(
        &self,
        vault: &str,
        name: &str,
        value: &str,
        description: &str,
    ) -> Result<(), VaultError>;
}

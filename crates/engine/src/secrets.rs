// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-stack passphrase provisioning

use crate::error::EngineError;
use sl_adapters::SecretStore;
use sl_core::StackPassphrase;

/// Reads and creates stack passphrases.
///
/// `get_or_create` is not compare-and-set safe on its own; callers hold the
/// init lock around it.
#[derive(Clone)]
pub struct SecretProvisioner<V> {
    vault: V,
}

impl<V: SecretStore> SecretProvisioner<V> {
    pub fn new(vault: V) -> Self {
        Self { vault }
    }

    /// `None` when the secret is absent or empty
    pub async fn get_optional(
        &self,
        vault: &str,
        name: &str,
    ) -> Result<Option<StackPassphrase>, EngineError> {
        let value = self.vault.get_secret(vault, name).await?;
        Ok(value
            .filter(|v| !v.is_empty())
            .map(StackPassphrase::from_stored))
    }

    pub async fn get_required(
        &self,
        vault: &str,
        name: &str,
    ) -> Result<StackPassphrase, EngineError> {
        self.get_optional(vault, name)
            .await?
            .ok_or_else(|| EngineError::SecretNotFound {
                vault: vault.to_string(),
                name: name.to_string(),
            })
    }

    /// Existing passphrase, or a freshly generated one that has been written
    /// and read back verbatim
    pub async fn get_or_create(
        &self,
        vault: &str,
        name: &str,
        description: &str,
    ) -> Result<StackPassphrase, EngineError> {
        if let Some(existing) = self.get_optional(vault, name).await? {
            tracing::debug!(vault, name, "using existing passphrase");
            return Ok(existing);
        }

        let generated = StackPassphrase::generate();
        self.vault
            .set_secret(vault, name, generated.expose(), description)
            .await?;

        let readback = self.vault.get_secret(vault, name).await?;
        if readback.as_deref() != Some(generated.expose()) {
            return Err(EngineError::SecretWriteVerificationFailed {
                vault: vault.to_string(),
                name: name.to_string(),
            });
        }

        tracing::info!(vault, name, "created passphrase");
        Ok(generated)
    }
}

#[cfg(test)]
#[path = "secrets_tests.rs"]
mod tests;

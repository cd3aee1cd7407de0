// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Marker objects that serve as lock targets

use crate::error::EngineError;
use sl_adapters::{BlobStore, WriteMode};
use sl_core::ExistencePolicy;

/// Creates placeholder objects under an [`ExistencePolicy`]
#[derive(Clone)]
pub struct BlobPlaceholderCreator<S> {
    store: S,
}

impl<S: BlobStore> BlobPlaceholderCreator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Upload `content` as `blob`.
    ///
    /// Under [`ExistencePolicy::DoNothingIfExists`] a conflict is success only
    /// when the store's error category says the object already exists.
    pub async fn ensure_exists(
        &self,
        blob: &str,
        content: &[u8],
        policy: ExistencePolicy,
    ) -> Result<(), EngineError> {
        let mode = if policy.is_conditional() {
            WriteMode::CreateOnly
        } else {
            WriteMode::Overwrite
        };

        match self.store.put(blob, content.to_vec(), mode).await {
            Ok(()) => {
                tracing::info!(blob, %policy, "placeholder created");
                Ok(())
            }
            Err(e)
                if policy == ExistencePolicy::DoNothingIfExists
                    && e.category().is_some_and(|c| c.means_already_exists()) =>
            {
                tracing::debug!(blob, "placeholder already exists");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "placeholder_tests.rs"]
mod tests;

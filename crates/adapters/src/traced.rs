// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::store::{BlobStore, StoreError, WriteMode};
use crate::tool::{ToolError, ToolInvocation, ToolOutput, ToolRunner};
use crate::vault::{SecretStore, VaultError};
use async_trait::async_trait;
use std::time::Instant;
use tracing::Instrument;

/// Wrapper that adds tracing to any BlobStore
#[derive(Clone)]
pub struct TracedBlobStore<S> {
    inner: S,
}

impl<S> TracedBlobStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: BlobStore> BlobStore for TracedBlobStore<S> {
    async fn exists(&self, blob: &str) -> Result<bool, StoreError> {
        let result = self.inner.exists(blob).await;
        tracing::debug!(blob, exists = ?result.as_ref().ok(), "checked");
        result
    }

    async fn put(&self, blob: &str, content: Vec<u8>, mode: WriteMode) -> Result<(), StoreError> {
        let span = tracing::info_span!("store.put_blob", blob, mode = ?mode);
        async move {
            tracing::info!(size = content.len(), "uploading");

            let start = Instant::now();
            let result = self.inner.put(blob, content, mode).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "uploaded"),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "upload failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn acquire_lease(&self, blob: &str) -> Result<String, StoreError> {
        let span = tracing::info_span!("store.acquire_lease", blob);
        async move {
            let start = Instant::now();
            let result = self.inner.acquire_lease(blob).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(_) => tracing::info!(elapsed_ms, "lease acquired"),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "lease not acquired"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn release_lease(&self, blob: &str, lease_id: &str) -> Result<(), StoreError> {
        let span = tracing::info_span!("store.release_lease", blob);
        async move {
            let result = self.inner.release_lease(blob, lease_id).await;
            match &result {
                Ok(()) => tracing::info!("lease released"),
                Err(e) => tracing::warn!(error = %e, "release failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any SecretStore
#[derive(Clone)]
pub struct TracedSecretStore<S> {
    inner: S,
}

impl<S> TracedSecretStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: SecretStore> SecretStore for TracedSecretStore<S> {
    async fn get_secret(&self, vault: &str, name: &str) -> Result<Option<String>, VaultError> {
        let span = tracing::info_span!("vault.get_secret", vault, name);
        async move {
            let result = self.inner.get_secret(vault, name).await;
            match &result {
                Ok(value) => tracing::debug!(found = value.is_some(), "read"),
                Err(e) => tracing::error!(error = %e, "read failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn set_secret(
        &self,
        vault: &str,
        name: &str,
        value: &str,
        description: &str,
    ) -> Result<(), VaultError> {
        let span = tracing::info_span!("vault.set_secret", vault, name);
        async move {
            let start = Instant::now();
            let result = self.inner.set_secret(vault, name, value, description).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "secret written"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "write failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any ToolRunner
#[derive(Clone)]
pub struct TracedToolRunner<R> {
    inner: R,
}

impl<R> TracedToolRunner<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: ToolRunner> ToolRunner for TracedToolRunner<R> {
    async fn run(&self, invocation: ToolInvocation) -> Result<ToolOutput, ToolError> {
        let command_line = invocation.command_line();
        let span = tracing::info_span!("tool.run", command = %command_line);
        async move {
            tracing::info!(env_count = invocation.env().len(), "starting");

            // Precondition: cwd must exist
            if let Some(cwd) = invocation.working_dir() {
                if !cwd.is_dir() {
                    tracing::error!(cwd = %cwd.display(), "working directory does not exist");
                    return Err(ToolError::Spawn {
                        program: invocation.program().to_string(),
                        message: format!("working directory does not exist: {}", cwd.display()),
                    });
                }
            }

            let start = Instant::now();
            let result = self.inner.run(invocation).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(out) if out.success() => tracing::info!(elapsed_ms, "finished"),
                Ok(out) => tracing::warn!(elapsed_ms, exit_code = out.exit_code, "exited non-zero"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "run failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-command protocols over the shared remote store

use crate::error::EngineError;
use crate::lease::LeaseLockManager;
use crate::placeholder::BlobPlaceholderCreator;
use crate::reconcile::{ConfigReconciler, ReconcileOutcome};
use crate::secrets::SecretProvisioner;
use crate::tool::{StackTool, ToolEnv};
use sl_adapters::{BlobStore, OutputMode, SecretStore, ToolOutput, ToolRunner};
use sl_core::passphrase::ENV_PASSPHRASE;
use sl_core::{
    BlobPaths, ExistencePolicy, ExternalVariable, MutateCommand, StackIdentity, StackPassphrase,
};

/// Upload source for lock placeholders; only the object's existence matters
const LOCK_MARKER: &[u8] = b"";

/// Coordinator adapter dependencies
pub struct EngineDeps<S, V, T> {
    pub store: S,
    pub vault: V,
    pub tool: StackTool<T>,
}

/// Runs the init, exists and mutate protocols.
///
/// Mutual exclusion across processes comes only from leases on remote lock
/// objects; nothing here holds in-process locks.
pub struct StackLockCoordinator<S, V, T> {
    store: S,
    locks: LeaseLockManager<S>,
    placeholders: BlobPlaceholderCreator<S>,
    secrets: SecretProvisioner<V>,
    tool: StackTool<T>,
    env: ToolEnv,
}

impl<S, V, T> StackLockCoordinator<S, V, T>
where
    S: BlobStore,
    V: SecretStore,
    T: ToolRunner,
{
    /// `env` is the tool environment prepared by bootstrap; the passphrase
    /// is layered on top per protocol.
    pub fn new(deps: EngineDeps<S, V, T>, env: ToolEnv) -> Self {
        Self {
            locks: LeaseLockManager::new(deps.store.clone()),
            placeholders: BlobPlaceholderCreator::new(deps.store.clone()),
            store: deps.store,
            secrets: SecretProvisioner::new(deps.vault),
            tool: deps.tool,
            env,
        }
    }

    fn env_with(&self, passphrase: &StackPassphrase) -> ToolEnv {
        let mut env = self.env.clone();
        env.insert(ENV_PASSPHRASE.to_string(), passphrase.expose().to_string());
        env
    }

    /// Create the stack, its passphrase and its lock placeholder under the
    /// init lock
    pub async fn init(&self, stack: &StackIdentity) -> Result<(), EngineError> {
        self.placeholders
            .ensure_exists(
                BlobPaths::INIT_LOCK,
                LOCK_MARKER,
                ExistencePolicy::DoNothingIfExists,
            )
            .await?;

        self.locks
            .with_lease(BlobPaths::INIT_LOCK, async {
                let passphrase = self
                    .secrets
                    .get_or_create(
                        &stack.vault_name,
                        &stack.secret_name,
                        &stack.passphrase_description(),
                    )
                    .await?;

                self.tool
                    .init_stack(&stack.stack_name, &self.env_with(&passphrase))
                    .await?;

                self.placeholders
                    .ensure_exists(
                        &BlobPaths::stack_lock(&stack.stack_name),
                        LOCK_MARKER,
                        ExistencePolicy::DoNothingIfExists,
                    )
                    .await?;

                tracing::info!(stack = %stack.stack_name, "stack initialized");
                Ok(())
            })
            .await
    }

    /// Advisory existence check of the stack's state object; takes no lock
    pub async fn exists(&self, stack: &StackIdentity) -> Result<bool, EngineError> {
        let exists = self
            .store
            .exists(&BlobPaths::stack_state(&stack.stack_name))
            .await?;
        tracing::info!(stack = %stack.stack_name, exists, "checked stack existence");
        Ok(exists)
    }

    /// Reconcile config under the per-stack lock
    pub async fn update_config(
        &self,
        stack: &StackIdentity,
        variables: &[ExternalVariable],
        prefixes: &[String],
        include_prefix: bool,
    ) -> Result<ReconcileOutcome, EngineError> {
        self.under_stack_lock(stack, move |env| async move {
            ConfigReconciler::new(&self.tool, &env, variables)
                .reconcile(prefixes, include_prefix)
                .await
        })
        .await
    }

    /// Run a mutate command under the per-stack lock.
    ///
    /// The tool's exit code is returned unchanged alongside the command line;
    /// promoting it to an error is left to the caller so captured output can
    /// be kept first. The lock is already released when this returns.
    pub async fn mutate(
        &self,
        stack: &StackIdentity,
        command: MutateCommand,
        raw_args: &[String],
        output: OutputMode,
    ) -> Result<(ToolOutput, String), EngineError> {
        self.under_stack_lock(stack, move |env| async move {
            self.tool.exec(command, raw_args, &env, output).await
        })
        .await
    }

    /// Shared mutate steps: lock, passphrase, stack select, body, release
    async fn under_stack_lock<R, F, Fut>(
        &self,
        stack: &StackIdentity,
        body: F,
    ) -> Result<R, EngineError>
    where
        F: FnOnce(ToolEnv) -> Fut,
        Fut: std::future::Future<Output = Result<R, EngineError>>,
    {
        let lock = BlobPaths::stack_lock(&stack.stack_name);
        self.locks
            .with_lease(&lock, async {
                let passphrase = self
                    .secrets
                    .get_required(&stack.vault_name, &stack.secret_name)
                    .await?;
                let env = self.env_with(&passphrase);
                self.tool.select_stack(&stack.stack_name, &env).await?;
                body(env).await
            })
            .await
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;

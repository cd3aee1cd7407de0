// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures: one set of fakes stands in for the remote services that
//! every coordinator built from it talks to

use crate::coordinator::{EngineDeps, StackLockCoordinator};
use crate::tool::{StackTool, ToolEnv};
use sl_adapters::{FakeBlobStore, FakeSecretStore, FakeToolRunner};
use sl_core::{StackIdentity, StackNameRule};

pub(crate) const VAULT: &str = "kv-stacks";

pub(crate) type FakeCoordinator =
    StackLockCoordinator<FakeBlobStore, FakeSecretStore, FakeToolRunner>;

#[derive(Clone, Default)]
pub(crate) struct Remote {
    pub store: FakeBlobStore,
    pub vault: FakeSecretStore,
    pub runner: FakeToolRunner,
}

impl Remote {
    pub fn new() -> Self {
        Self::default()
    }

    /// A coordinator as a separate process would build it
    pub fn coordinator(&self) -> FakeCoordinator {
        let env: ToolEnv = [("AZURE_STORAGE_ACCOUNT".to_string(), "stacks".to_string())]
            .into_iter()
            .collect();
        StackLockCoordinator::new(
            EngineDeps {
                store: self.store.clone(),
                vault: self.vault.clone(),
                tool: StackTool::new(self.runner.clone(), "pulumi", "."),
            },
            env,
        )
    }

    /// State of a stack that went through init earlier
    pub fn seed_initialized(&self, stack: &StackIdentity) {
        self.store
            .insert(&sl_core::BlobPaths::stack_lock(&stack.stack_name), b"");
        self.store
            .insert(&sl_core::BlobPaths::stack_state(&stack.stack_name), b"{}");
        self.vault
            .insert(&stack.vault_name, &stack.secret_name, "existing-passphrase");
    }
}

pub(crate) fn stack(name: &str) -> StackIdentity {
    StackIdentity::new(name, None, VAULT, StackNameRule::Strict).unwrap()
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: object store, secret store, cloud identity,
//! the infrastructure tool and the pipeline variable namespace

pub mod identity;
pub mod store;
pub mod tool;
pub mod traced;
pub mod variables;
pub mod vault;

pub use identity::{AzCliIdentity, CloudIdentity, IdentityError};
pub use store::{AzureBlobStore, BlobStore, ErrorCategory, StoreError, WriteMode};
pub use tool::{OutputMode, ProcessToolRunner, ToolError, ToolInvocation, ToolOutput, ToolRunner};
pub use traced::{TracedBlobStore, TracedSecretStore, TracedToolRunner};
pub use variables::{EnvVariableSource, PipelineVariableSink, VariableSink, VariableSource};
pub use vault::{KeyVaultStore, SecretStore, VaultError, VAULT_RESOURCE};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use identity::{FakeCloudIdentity, IdentityCall};
#[cfg(any(test, feature = "test-support"))]
pub use store::{FakeBlobStore, StoreCall, StoreOp};
#[cfg(any(test, feature = "test-support"))]
pub use tool::{FakeToolRunner, ToolCall};
#[cfg(any(test, feature = "test-support"))]
pub use variables::{FakeVariableSource, RecordingVariableSink};
#[cfg(any(test, feature = "test-support"))]
pub use vault::{FakeSecretStore, VaultCall};

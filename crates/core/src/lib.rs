// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sl-core: domain types for the stacklock coordinator
//!
//! This crate provides:
//! - Stack, credential and remote-store identities with validation
//! - Lock handles and placeholder existence policies
//! - Command requests and the closed command vocabulary
//! - External variable selection for config reconciliation
//! - The explicit per-run context and file-based settings

pub mod command;
pub mod context;
pub mod error;
pub mod identity;
pub mod lease;
pub mod location;
pub mod passphrase;
pub mod policy;
pub mod settings;
pub mod stack;
pub mod variable;

pub use command::{CommandKind, CommandRequest, MutateCommand};
pub use context::RunContext;
pub use error::ValidationError;
pub use identity::ServiceIdentity;
pub use lease::LockHandle;
pub use location::{BlobPaths, RemoteStoreLocation};
pub use passphrase::StackPassphrase;
pub use policy::ExistencePolicy;
pub use settings::{Settings, SettingsError};
pub use stack::{validate_stack_name, StackIdentity, StackNameRule};
pub use variable::{select_prefixed, validate_prefixes, ConfigEntry, ExternalVariable};

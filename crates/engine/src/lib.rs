// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Stack lock engine: lease locking, passphrase provisioning, config
//! reconciliation and the per-command protocols built on them

pub mod bootstrap;
mod coordinator;
mod dispatch;
mod error;
mod lease;
mod placeholder;
mod reconcile;
mod secrets;
mod tool;

pub use bootstrap::{prepare, BootstrapInputs, Bootstrapped};
pub use coordinator::{EngineDeps, StackLockCoordinator};
pub use dispatch::{CommandDispatcher, DispatchOptions, DispatchOutcome};
pub use error::EngineError;
pub use lease::LeaseLockManager;
pub use placeholder::BlobPlaceholderCreator;
pub use reconcile::{ConfigReconciler, ReconcileOutcome};
pub use secrets::SecretProvisioner;
pub use tool::{StackTool, ToolEnv};

#[cfg(test)]
mod test_helpers;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote object store addressing

use std::fmt;

pub const ENV_STORAGE_ACCOUNT: &str = "AZURE_STORAGE_ACCOUNT";
pub const ENV_STORAGE_KEY: &str = "AZURE_STORAGE_KEY";

/// Storage account, its access key and the container holding stack state.
///
/// The access key is fetched once per run and only ever held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteStoreLocation {
    pub account_name: String,
    access_key: String,
    pub container_name: String,
}

impl RemoteStoreLocation {
    pub fn new(
        account_name: impl Into<String>,
        access_key: impl Into<String>,
        container_name: impl Into<String>,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            access_key: access_key.into(),
            container_name: container_name.into(),
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Backend URL the infrastructure tool logs in to
    pub fn backend_url(&self) -> String {
        format!("azblob://{}", self.container_name)
    }

    pub fn tool_env(&self) -> Vec<(String, String)> {
        vec![
            (ENV_STORAGE_ACCOUNT.to_string(), self.account_name.clone()),
            (ENV_STORAGE_KEY.to_string(), self.access_key.clone()),
        ]
    }
}

impl fmt::Debug for RemoteStoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteStoreLocation")
            .field("account_name", &self.account_name)
            .field("access_key", &"***")
            .field("container_name", &self.container_name)
            .finish()
    }
}

/// Well-known object names inside the state container
pub struct BlobPaths;

impl BlobPaths {
    /// Lock guarding first-time initialization of any stack
    pub const INIT_LOCK: &'static str = "init-stack.lock";

    /// Per-stack lock placeholder, keyed by stack name
    pub fn stack_lock(stack_name: &str) -> String {
        format!("state-locks/{}.lock", stack_name)
    }

    /// Object the infrastructure tool writes once a stack exists
    pub fn stack_state(stack_name: &str) -> String {
        format!(".pulumi/stacks/{}.json", stack_name)
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service principal credentials

use std::fmt;

pub const ENV_CLIENT_ID: &str = "ARM_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "ARM_CLIENT_SECRET";
pub const ENV_TENANT_ID: &str = "ARM_TENANT_ID";
pub const ENV_SUBSCRIPTION_ID: &str = "ARM_SUBSCRIPTION_ID";

/// Opaque credential tuple used to log in and injected into the tool environment.
///
/// `Debug` never prints the client secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    client_id: String,
    client_secret: String,
    tenant_id: String,
    subscription_id: String,
}

impl ServiceIdentity {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        tenant_id: impl Into<String>,
        subscription_id: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            tenant_id: tenant_id.into(),
            subscription_id: subscription_id.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// Environment entries the infrastructure tool reads its cloud credentials from
    pub fn tool_env(&self) -> Vec<(String, String)> {
        vec![
            (ENV_CLIENT_ID.to_string(), self.client_id.clone()),
            (ENV_CLIENT_SECRET.to_string(), self.client_secret.clone()),
            (ENV_TENANT_ID.to_string(), self.tenant_id.clone()),
            (ENV_SUBSCRIPTION_ID.to_string(), self.subscription_id.clone()),
        ]
    }
}

impl fmt::Debug for ServiceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceIdentity")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("tenant_id", &self.tenant_id)
            .field("subscription_id", &self.subscription_id)
            .finish()
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Azure Key Vault adapter over the REST API

use super::{SecretStore, VaultError};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::fmt;

const API_VERSION: &str = "7.4";
const DNS_SUFFIX: &str = "vault.azure.net";

/// Resource the bearer token must be issued for
pub const VAULT_RESOURCE: &str = "https://vault.azure.net";

#[derive(Clone)]
pub struct KeyVaultStore {
    client: reqwest::Client,
    token: String,
    /// Replaces `https://<vault>.vault.azure.net` for every vault
    base: Option<Url>,
}

#[derive(Deserialize)]
struct SecretBundle {
    value: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetSecretBody<'a> {
    value: &'a str,
    content_type: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: String,
}

impl KeyVaultStore {
    /// `token` is a bearer token issued for [`VAULT_RESOURCE`]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            base: None,
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base: Url) -> Self {
        self.base = Some(base);
        self
    }

    fn secret_url(&self, operation: &'static str, vault: &str, name: &str) -> Result<Url, VaultError> {
        let invalid = |message: String| VaultError::Transport {
            operation,
            vault: vault.to_string(),
            name: name.to_string(),
            message,
        };
        let mut url = match &self.base {
            Some(base) => base.clone(),
            None => Url::parse(&format!("https://{}.{}", vault, DNS_SUFFIX))
                .map_err(|e| invalid(e.to_string()))?,
        };
        url.path_segments_mut()
            .map_err(|()| invalid("vault URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["secrets", name]);
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }
}

impl fmt::Debug for KeyVaultStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyVaultStore")
            .field("base", &self.base.as_ref().map(Url::as_str))
            .finish_non_exhaustive()
    }
}

async fn service_error(
    operation: &'static str,
    vault: &str,
    name: &str,
    response: reqwest::Response,
) -> VaultError {
    let status = response.status().as_u16();
    let code = response
        .json::<ErrorBody>()
        .await
        .map(|b| b.error.code)
        .unwrap_or_else(|_| "Unknown".to_string());
    VaultError::Service {
        operation,
        vault: vault.to_string(),
        name: name.to_string(),
        status,
        code,
    }
}

fn transport(operation: &'static str, vault: &str, name: &str, e: reqwest::Error) -> VaultError {
    VaultError::Transport {
        operation,
        vault: vault.to_string(),
        name: name.to_string(),
        message: e.to_string(),
    }
}

#[async_trait]
impl SecretStore for KeyVaultStore {
    async fn get_secret(&self, vault: &str, name: &str) -> Result<Option<String>, VaultError> {
        let url = self.secret_url("get", vault, name)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| transport("get", vault, name, e))?;

        match response.status() {
            StatusCode::OK => {
                let bundle: SecretBundle = response
                    .json()
                    .await
                    .map_err(|e| transport("get", vault, name, e))?;
                Ok(bundle.value.filter(|v| !v.is_empty()))
            }
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(service_error("get", vault, name, response).await),
        }
    }

    async fn set_secret(
        &self,
        vault: &str,
        name: &str,
        value: &str,
        description: &str,
    ) -> Result<(), VaultError> {
        let url = self.secret_url("set", vault, name)?;
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(&SetSecretBody {
                value,
                content_type: description,
            })
            .send()
            .await
            .map_err(|e| transport("set", vault, name, e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(service_error("set", vault, name, response).await)
        }
    }
}

#[cfg(test)]
#[path = "keyvault_tests.rs"]
mod tests;

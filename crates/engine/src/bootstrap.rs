// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-time run preparation: cloud login, tool version check, storage
//! credentials and backend login

use crate::error::EngineError;
use crate::tool::StackTool;
use sl_adapters::{CloudIdentity, ToolRunner, VariableSink, VAULT_RESOURCE};
use sl_core::{RemoteStoreLocation, RunContext, ServiceIdentity};

/// Inputs bootstrap needs beyond its collaborators
pub struct BootstrapInputs {
    pub identity: ServiceIdentity,
    pub storage_account: String,
    pub container: String,
    /// Variable the installed tool version is written back to
    pub installed_version_variable: String,
}

/// Credentials resolved once for the rest of the run
#[derive(Debug)]
pub struct Bootstrapped {
    pub location: RemoteStoreLocation,
    /// Bearer token for the secret store
    pub vault_token: String,
}

/// Prepare a validated run.
///
/// On success `ctx` carries the tool environment (service identity and
/// storage credentials) and the installed tool version.
pub async fn prepare<I, T, K>(
    ctx: &mut RunContext,
    inputs: BootstrapInputs,
    cloud: &I,
    tool: &StackTool<T>,
    sink: &K,
) -> Result<Bootstrapped, EngineError>
where
    I: CloudIdentity,
    T: ToolRunner,
    K: VariableSink + ?Sized,
{
    cloud.login(&inputs.identity).await?;
    tracing::info!(run_id = %ctx.run_id, "logged in to cloud");

    let version = tool.version().await?;
    ctx.record_installed_version(&version)?;
    tracing::info!(version = %version, "tool version");
    sink.set_variable(&inputs.installed_version_variable, &version, false)
        .map_err(|e| {
            EngineError::io(
                format!("setting variable {}", inputs.installed_version_variable),
                e,
            )
        })?;

    let key = cloud.storage_account_key(&inputs.storage_account).await?;
    if key.trim().is_empty() {
        return Err(EngineError::Credential(format!(
            "no access key returned for storage account {}",
            inputs.storage_account
        )));
    }
    let location = RemoteStoreLocation::new(inputs.storage_account, key.trim(), inputs.container);

    let vault_token = cloud.access_token(VAULT_RESOURCE).await?;
    if vault_token.trim().is_empty() {
        return Err(EngineError::Credential(
            "no access token returned for the key vault".to_string(),
        ));
    }

    ctx.extend_env(inputs.identity.tool_env());
    ctx.extend_env(location.tool_env());

    tool.login(&location.backend_url(), ctx.tool_env()).await?;
    tracing::info!(container = %location.container_name, "logged in to state backend");

    Ok(Bootstrapped {
        location,
        vault_token: vault_token.trim().to_string(),
    })
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;

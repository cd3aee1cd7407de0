// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Azure CLI identity adapter

use super::{CloudIdentity, IdentityError};
use async_trait::async_trait;
use sl_core::ServiceIdentity;
use tokio::process::Command;

/// Identity adapter backed by the `az` command line
#[derive(Clone, Debug)]
pub struct AzCliIdentity {
    program: String,
}

impl Default for AzCliIdentity {
    fn default() -> Self {
        Self::new("az")
    }
}

impl AzCliIdentity {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `az` silently; returns trimmed stdout.
    ///
    /// `shown` replaces `args` in error messages so secrets never surface.
    async fn run(&self, args: &[&str], shown: &str) -> Result<String, IdentityError> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| IdentityError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(IdentityError::Failed {
                command: format!("{} {}", self.program, shown),
                exit_code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn query(&self, args: &[&str]) -> Result<String, IdentityError> {
        let shown = args.join(" ");
        let stdout = self.run(args, &shown).await?;
        last_line(&stdout).ok_or(IdentityError::EmptyOutput(shown))
    }
}

fn last_line(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .rfind(|l| !l.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl CloudIdentity for AzCliIdentity {
    async fn login(&self, identity: &ServiceIdentity) -> Result<(), IdentityError> {
        self.run(
            &[
                "login",
                "--service-principal",
                "--username",
                identity.client_id(),
                "--password",
                identity.client_secret(),
                "--tenant",
                identity.tenant_id(),
                "--output",
                "none",
            ],
            "login --service-principal --username *** --password *** --tenant ***",
        )
        .await?;

        self.run(
            &["account", "set", "--subscription", identity.subscription_id()],
            "account set --subscription ***",
        )
        .await?;
        Ok(())
    }

    async fn storage_account_key(&self, account: &str) -> Result<String, IdentityError> {
        self.query(&[
            "storage",
            "account",
            "keys",
            "list",
            "--account-name",
            account,
            "--query",
            "[0].value",
            "--output",
            "tsv",
        ])
        .await
    }

    async fn access_token(&self, resource: &str) -> Result<String, IdentityError> {
        self.query(&[
            "account",
            "get-access-token",
            "--resource",
            resource,
            "--query",
            "accessToken",
            "--output",
            "tsv",
        ])
        .await
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! stacklock - lease-locked pulumi runs against Azure remote state

mod error;
mod run;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "stacklock",
    version,
    about = "Run pulumi stack commands under a remote lease lock"
)]
pub(crate) struct Cli {
    /// Settings file (defaults to stacklock.toml in the working directory)
    #[arg(long, env = "STACKLOCK_CONFIG")]
    config: Option<PathBuf>,

    /// Stack name
    #[arg(long, env = "STACKLOCK_STACK")]
    stack: Option<String>,

    /// Key vault secret holding the stack passphrase (defaults to the stack name)
    #[arg(long, env = "STACKLOCK_SECRET_NAME")]
    secret_name: Option<String>,

    /// Storage account holding remote state
    #[arg(long, env = "STACKLOCK_STORAGE_ACCOUNT")]
    storage_account: Option<String>,

    /// Blob container holding remote state
    #[arg(long, env = "STACKLOCK_CONTAINER")]
    container: Option<String>,

    /// Key vault holding stack passphrases
    #[arg(long, env = "STACKLOCK_KEY_VAULT")]
    key_vault: Option<String>,

    /// Pulumi program directory
    #[arg(long, env = "STACKLOCK_CWD")]
    cwd: Option<PathBuf>,

    /// Tool executable
    #[arg(long, env = "STACKLOCK_TOOL")]
    tool: Option<PathBuf>,

    /// Required tool version ("latest" or empty for any)
    #[arg(long, env = "STACKLOCK_TOOL_VERSION")]
    tool_version: Option<String>,

    /// Variable name prefix reconciled into stack config (repeatable)
    #[arg(long = "prefix", env = "STACKLOCK_PREFIXES", value_delimiter = ',')]
    prefixes: Vec<String>,

    /// Keep the prefix in config keys
    #[arg(long, env = "STACKLOCK_INCLUDE_PREFIX")]
    include_prefix: bool,

    /// Save the command's output to this file
    #[arg(long, env = "STACKLOCK_OUTPUT_FILE")]
    output_file: Option<PathBuf>,

    /// Allow periods in stack names
    #[arg(long, env = "STACKLOCK_ALLOW_PERIODS")]
    allow_periods: bool,

    #[arg(long, env = "ARM_CLIENT_ID", hide_env_values = true)]
    client_id: Option<String>,

    #[arg(long, env = "ARM_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    #[arg(long, env = "ARM_TENANT_ID", hide_env_values = true)]
    tenant_id: Option<String>,

    #[arg(long, env = "ARM_SUBSCRIPTION_ID", hide_env_values = true)]
    subscription_id: Option<String>,

    /// init, exists, update-config, preview, up, destroy, refresh, import or cancel
    command: String,

    /// Arguments passed through to the tool
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging();

    match run::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", error::render(&e));
            ExitCode::FAILURE
        }
    }
}

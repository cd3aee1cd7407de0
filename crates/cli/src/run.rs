// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation, bootstrap and dispatch of one run

use crate::Cli;
use anyhow::Result;
use sl_adapters::{
    AzCliIdentity, AzureBlobStore, EnvVariableSource, KeyVaultStore, PipelineVariableSink,
    ProcessToolRunner, TracedBlobStore, TracedSecretStore, TracedToolRunner, VariableSource,
};
use sl_core::{
    validate_prefixes, validate_stack_name, CommandKind, CommandRequest, RunContext,
    ServiceIdentity, Settings, StackIdentity, StackNameRule, ValidationError,
};
use sl_engine::{
    bootstrap, BootstrapInputs, CommandDispatcher, DispatchOptions, DispatchOutcome, EngineDeps,
    EngineError, StackLockCoordinator, StackTool,
};

impl Cli {
    /// Command-line values as a settings layer
    fn overrides(&self) -> Settings {
        let mut settings = Settings {
            stack: self.stack.clone(),
            secret_name: self.secret_name.clone(),
            storage_account: self.storage_account.clone(),
            container: self.container.clone(),
            key_vault: self.key_vault.clone(),
            working_dir: self.cwd.clone(),
            tool: self.tool.clone(),
            tool_version: self.tool_version.clone(),
            stack_name_rule: self.allow_periods.then_some(StackNameRule::AllowPeriods),
            output_file: self.output_file.clone(),
            ..Settings::default()
        };
        settings.reconcile.prefixes = self.prefixes.clone();
        settings.reconcile.include_prefix = self.include_prefix.then_some(true);
        settings
    }

    fn identity(&self) -> Result<ServiceIdentity, ValidationError> {
        Ok(ServiceIdentity::new(
            required(&self.client_id, "ARM_CLIENT_ID")?,
            required(&self.client_secret, "ARM_CLIENT_SECRET")?,
            required(&self.tenant_id, "ARM_TENANT_ID")?,
            required(&self.subscription_id, "ARM_SUBSCRIPTION_ID")?,
        ))
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, ValidationError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ValidationError::MissingInput(name))
}

/// Inputs checked before any remote call
struct Validated {
    request: CommandRequest,
    identity: ServiceIdentity,
    storage_account: String,
    container: String,
}

fn validate(cli: &Cli, settings: &Settings) -> Result<Validated, EngineError> {
    let rule = settings.stack_name_rule();
    let stack_name = settings.require_stack()?;
    validate_stack_name(stack_name, rule)?;
    let kind = CommandKind::parse(&cli.command)?;
    validate_prefixes(&settings.reconcile.prefixes)?;

    let stack = StackIdentity::new(
        stack_name,
        settings.secret_name.clone(),
        settings.require_key_vault()?,
        rule,
    )?;
    Ok(Validated {
        request: CommandRequest {
            kind,
            stack,
            raw_args: cli.args.clone(),
        },
        identity: cli.identity()?,
        storage_account: settings.require_storage_account()?.to_string(),
        container: settings.require_container()?.to_string(),
    })
}

pub(crate) async fn run(cli: Cli) -> Result<()> {
    let dir = cli
        .cwd
        .clone()
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let settings = Settings::discover(cli.config.as_deref(), &dir)?.merge(cli.overrides());

    let validated = validate(&cli, &settings)?;

    let source = EnvVariableSource::from_process();
    let sink = PipelineVariableSink::stdout();
    let mut ctx = RunContext::new(settings.tool_version.clone())
        .with_installed_version(source.get(settings.variables.installed_version()));
    tracing::info!(
        run_id = %ctx.run_id,
        stack = %validated.request.stack.stack_name,
        command = %validated.request.kind,
        "starting"
    );

    let tool = StackTool::new(
        TracedToolRunner::new(ProcessToolRunner::new()),
        settings.tool().to_string_lossy(),
        settings.working_dir(),
    );

    let ready = bootstrap::prepare(
        &mut ctx,
        BootstrapInputs {
            identity: validated.identity,
            storage_account: validated.storage_account,
            container: validated.container,
            installed_version_variable: settings.variables.installed_version().to_string(),
        },
        &AzCliIdentity::default(),
        &tool,
        &sink,
    )
    .await?;

    let store = AzureBlobStore::new(&ready.location).map_err(EngineError::from)?;
    let store = TracedBlobStore::new(store);
    let vault = TracedSecretStore::new(KeyVaultStore::new(ready.vault_token));
    let coordinator =
        StackLockCoordinator::new(EngineDeps { store, vault, tool }, ctx.tool_env().clone());

    let options = DispatchOptions {
        prefixes: settings.reconcile.prefixes.clone(),
        include_prefix: settings.include_prefix(),
        output_file: settings.output_file.clone(),
        exists_variable: settings.variables.exists().to_string(),
        config_status_variable: settings.variables.config_status().to_string(),
    };
    let dispatcher = CommandDispatcher::new(coordinator, source.variables(), &sink, options);

    match dispatcher.dispatch(&validated.request).await? {
        DispatchOutcome::Initialized => tracing::info!("new stack created"),
        DispatchOutcome::Exists(exists) => tracing::info!(exists, "stack existence checked"),
        DispatchOutcome::ConfigReconciled(outcome) => {
            tracing::info!(status = outcome.status(), "config reconciled")
        }
        DispatchOutcome::Completed(_) => tracing::info!("command completed"),
    }
    Ok(())
}

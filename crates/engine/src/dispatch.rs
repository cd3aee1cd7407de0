// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request routing and result surfacing

use crate::coordinator::StackLockCoordinator;
use crate::error::EngineError;
use crate::reconcile::ReconcileOutcome;
use sl_adapters::{BlobStore, OutputMode, SecretStore, ToolOutput, ToolRunner, VariableSink};
use sl_core::settings::{DEFAULT_CONFIG_STATUS_VARIABLE, DEFAULT_EXISTS_VARIABLE};
use sl_core::{CommandKind, CommandRequest, ExternalVariable, StackIdentity};
use std::path::PathBuf;

/// Per-run dispatch settings
#[derive(Clone, Debug)]
pub struct DispatchOptions {
    /// Variable name prefixes reconciled by update-config
    pub prefixes: Vec<String>,
    pub include_prefix: bool,
    /// Where mutate output is persisted; `None` leaves output uncaptured
    pub output_file: Option<PathBuf>,
    pub exists_variable: String,
    pub config_status_variable: String,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            prefixes: Vec::new(),
            include_prefix: false,
            output_file: None,
            exists_variable: DEFAULT_EXISTS_VARIABLE.to_string(),
            config_status_variable: DEFAULT_CONFIG_STATUS_VARIABLE.to_string(),
        }
    }
}

/// What a dispatched request produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Initialized,
    Exists(bool),
    ConfigReconciled(ReconcileOutcome),
    Completed(ToolOutput),
}

/// Routes requests to their protocol and surfaces results
pub struct CommandDispatcher<S, V, T, K> {
    coordinator: StackLockCoordinator<S, V, T>,
    variables: Vec<ExternalVariable>,
    sink: K,
    options: DispatchOptions,
}

impl<S, V, T, K> CommandDispatcher<S, V, T, K>
where
    S: BlobStore,
    V: SecretStore,
    T: ToolRunner,
    K: VariableSink,
{
    pub fn new(
        coordinator: StackLockCoordinator<S, V, T>,
        variables: Vec<ExternalVariable>,
        sink: K,
        options: DispatchOptions,
    ) -> Self {
        Self {
            coordinator,
            variables,
            sink,
            options,
        }
    }

    /// Classify a raw command and dispatch it. Unsupported commands fail
    /// before anything remote is touched.
    pub async fn dispatch_command(
        &self,
        command: &str,
        stack: StackIdentity,
        raw_args: Vec<String>,
    ) -> Result<DispatchOutcome, EngineError> {
        let request = CommandRequest::parse(command, stack, raw_args)?;
        self.dispatch(&request).await
    }

    pub async fn dispatch(&self, request: &CommandRequest) -> Result<DispatchOutcome, EngineError> {
        let stack = &request.stack;
        tracing::info!(
            command = %request.kind,
            stack = %stack.stack_name,
            locked = request.kind.takes_stack_lock(),
            "dispatching"
        );

        match request.kind {
            CommandKind::Init => {
                self.coordinator.init(stack).await?;
                Ok(DispatchOutcome::Initialized)
            }
            CommandKind::Exists => {
                let exists = self.coordinator.exists(stack).await?;
                self.surface(&self.options.exists_variable, &exists.to_string())?;
                Ok(DispatchOutcome::Exists(exists))
            }
            CommandKind::UpdateConfig => {
                let outcome = self
                    .coordinator
                    .update_config(
                        stack,
                        &self.variables,
                        &self.options.prefixes,
                        self.options.include_prefix,
                    )
                    .await?;
                self.surface(&self.options.config_status_variable, outcome.status())?;
                Ok(DispatchOutcome::ConfigReconciled(outcome))
            }
            CommandKind::Mutate(command) => {
                let mode = if self.options.output_file.is_some() {
                    OutputMode::Tee
                } else {
                    OutputMode::Inherit
                };
                let (output, command_line) = self
                    .coordinator
                    .mutate(stack, command, &request.raw_args, mode)
                    .await?;

                if let Some(path) = &self.options.output_file {
                    tokio::fs::write(path, &output.stdout)
                        .await
                        .map_err(|e| {
                            EngineError::io(format!("writing output to {}", path.display()), e)
                        })?;
                    tracing::info!(
                        path = %path.display(),
                        bytes = output.stdout.len(),
                        "output saved"
                    );
                }

                if !output.success() {
                    return Err(EngineError::ToolInvocationFailed {
                        exit_code: output.exit_code,
                        command_line,
                    });
                }
                Ok(DispatchOutcome::Completed(output))
            }
        }
    }

    fn surface(&self, name: &str, value: &str) -> Result<(), EngineError> {
        self.sink
            .set_variable(name, value, false)
            .map_err(|e| EngineError::io(format!("setting variable {}", name), e))
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;

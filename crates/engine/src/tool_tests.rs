// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sl_adapters::FakeToolRunner;

fn tool() -> (FakeToolRunner, StackTool<FakeToolRunner>) {
    let runner = FakeToolRunner::new();
    (runner.clone(), StackTool::new(runner, "pulumi", "/tmp"))
}

fn env() -> ToolEnv {
    [("AZURE_STORAGE_ACCOUNT".to_string(), "stacks".to_string())]
        .into_iter()
        .collect()
}

#[tokio::test]
async fn version_strips_prefix() {
    let (runner, tool) = tool();
    runner.respond(&["version"], 0, "v3.100.0\n");
    assert_eq!(tool.version().await.unwrap(), "3.100.0");
}

#[tokio::test]
async fn login_failure_is_credential_error() {
    let (runner, tool) = tool();
    runner.respond(&["login"], 255, "");

    let err = tool.login("azblob://state", &env()).await.unwrap_err();
    assert!(matches!(err, EngineError::Credential(_)), "got {:?}", err);
    assert_eq!(runner.lines(), vec!["login -c azblob://state"]);
}

#[tokio::test]
async fn select_failure_carries_command_line() {
    let (runner, tool) = tool();
    runner.respond(&["stack", "select"], 1, "");

    let err = tool.select_stack("demo-1", &env()).await.unwrap_err();
    match err {
        EngineError::ToolInvocationFailed {
            exit_code,
            command_line,
        } => {
            assert_eq!(exit_code, 1);
            assert_eq!(command_line, "pulumi stack select demo-1");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn init_uses_passphrase_secrets_provider() {
    let (runner, tool) = tool();
    tool.init_stack("demo-1", &env()).await.unwrap();
    assert_eq!(
        runner.lines(),
        vec!["stack init demo-1 --secrets-provider passphrase"]
    );
    let call = &runner.calls()[0];
    assert_eq!(call.cwd.as_deref(), Some(std::path::Path::new("/tmp")));
    assert_eq!(call.env.get("AZURE_STORAGE_ACCOUNT").map(String::as_str), Some("stacks"));
}

#[tokio::test]
async fn config_get_read_failure_is_none() {
    let (runner, tool) = tool();
    runner.respond(&["config", "get", "REGION"], 0, "us-east-1\n");
    runner.respond(&["config", "get", "NEW"], 255, "");

    assert_eq!(
        tool.config_get("REGION", &env()).await.unwrap().as_deref(),
        Some("us-east-1")
    );
    assert_eq!(tool.config_get("NEW", &env()).await.unwrap(), None);
}

#[tokio::test]
async fn config_set_marks_secret_values() {
    let (runner, tool) = tool();
    let entry = ConfigEntry {
        key: "DB_PASSWORD".into(),
        value: "hunter2".into(),
        is_secret: true,
    };
    tool.config_set(&entry, &env()).await.unwrap();
    assert_eq!(runner.lines(), vec!["config set DB_PASSWORD --secret -- hunter2"]);
}

#[tokio::test]
async fn exec_passes_raw_args_and_reports_exit() {
    let (runner, tool) = tool();
    runner.respond(&["up"], 2, "boom\n");

    let (output, line) = tool
        .exec(
            MutateCommand::Up,
            &["--yes".to_string(), "--skip-preview".to_string()],
            &env(),
            OutputMode::Tee,
        )
        .await
        .unwrap();

    assert_eq!(output.exit_code, 2);
    assert_eq!(line, "pulumi up --yes --skip-preview");
    assert_eq!(runner.calls()[0].output, OutputMode::Tee);
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_helpers::{stack, FakeCoordinator, Remote};
use sl_adapters::{FakeToolRunner, RecordingVariableSink, StoreCall};
use sl_core::ExternalVariable;
use tempfile::tempdir;

fn dispatcher(
    remote: &Remote,
    variables: Vec<ExternalVariable>,
    options: DispatchOptions,
) -> (
    RecordingVariableSink,
    CommandDispatcher<
        sl_adapters::FakeBlobStore,
        sl_adapters::FakeSecretStore,
        FakeToolRunner,
        RecordingVariableSink,
    >,
) {
    let sink = RecordingVariableSink::new();
    let coordinator: FakeCoordinator = remote.coordinator();
    (
        sink.clone(),
        CommandDispatcher::new(coordinator, variables, sink, options),
    )
}

#[tokio::test]
async fn unsupported_command_touches_nothing_remote() {
    let remote = Remote::new();
    let (sink, dispatcher) = dispatcher(&remote, Vec::new(), DispatchOptions::default());

    let err = dispatcher
        .dispatch_command("stack rm", stack("demo-1"), Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::UnsupportedCommand(ref raw) if raw == "stack rm"));
    assert!(remote.store.calls().is_empty());
    assert!(remote.vault.calls().is_empty());
    assert!(remote.runner.calls().is_empty());
    assert!(sink.written().is_empty());
}

#[tokio::test]
async fn exists_surfaces_false_without_locking() {
    let remote = Remote::new();
    let (sink, dispatcher) = dispatcher(&remote, Vec::new(), DispatchOptions::default());

    let outcome = dispatcher
        .dispatch_command("exists", stack("demo-1"), Vec::new())
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Exists(false));
    assert_eq!(sink.value("STACK_EXISTS").as_deref(), Some("false"));
    assert!(remote
        .store
        .calls()
        .iter()
        .all(|c| matches!(c, StoreCall::Exists { .. })));
}

#[tokio::test]
async fn exists_uses_configured_variable_name() {
    let remote = Remote::new();
    let demo = stack("demo-1");
    remote.seed_initialized(&demo);
    let options = DispatchOptions {
        exists_variable: "DEMO_EXISTS".into(),
        ..DispatchOptions::default()
    };
    let (sink, dispatcher) = dispatcher(&remote, Vec::new(), options);

    dispatcher
        .dispatch_command("stack exists", demo, Vec::new())
        .await
        .unwrap();

    assert_eq!(sink.value("DEMO_EXISTS").as_deref(), Some("true"));
}

#[tokio::test]
async fn update_config_reports_some_change() {
    let remote = Remote::new();
    let demo = stack("demo-1");
    remote.seed_initialized(&demo);
    remote.runner.respond(&["config", "get", "REGION"], 0, "us-east-1\n");
    let options = DispatchOptions {
        prefixes: vec!["CFG_".into()],
        ..DispatchOptions::default()
    };
    let (sink, dispatcher) = dispatcher(
        &remote,
        vec![ExternalVariable::plain("CFG_REGION", "eu-west-1")],
        options,
    );

    let outcome = dispatcher
        .dispatch_command("update-config", demo, Vec::new())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::ConfigReconciled(ReconcileOutcome { any_changed: true })
    );
    let sets: Vec<_> = remote
        .runner
        .lines()
        .into_iter()
        .filter(|l| l.starts_with("config set"))
        .collect();
    assert_eq!(sets, vec!["config set REGION -- eu-west-1"]);
    assert_eq!(sink.value("CONFIG_CHANGE_STATUS").as_deref(), Some("some_change"));
}

#[tokio::test]
async fn update_config_without_matches_reports_no_change() {
    let remote = Remote::new();
    let demo = stack("demo-1");
    remote.seed_initialized(&demo);
    let options = DispatchOptions {
        prefixes: vec!["CFG_".into()],
        ..DispatchOptions::default()
    };
    let (sink, dispatcher) = dispatcher(&remote, Vec::new(), options);

    dispatcher
        .dispatch_command("config", demo, Vec::new())
        .await
        .unwrap();

    assert_eq!(sink.value("CONFIG_CHANGE_STATUS").as_deref(), Some("no_change"));
    assert_eq!(remote.runner.lines(), vec!["stack select demo-1"]);
}

#[tokio::test]
async fn non_zero_exit_is_promoted_after_release() {
    let remote = Remote::new();
    let demo = stack("demo-1");
    remote.seed_initialized(&demo);
    remote.runner.respond(&["up"], 1, "");
    let (_, dispatcher) = dispatcher(&remote, Vec::new(), DispatchOptions::default());

    let err = dispatcher
        .dispatch_command("up", demo, vec!["--yes".into()])
        .await
        .unwrap_err();

    match err {
        EngineError::ToolInvocationFailed {
            exit_code,
            command_line,
        } => {
            assert_eq!(exit_code, 1);
            assert_eq!(command_line, "pulumi up --yes");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(matches!(
        remote.store.calls().last(),
        Some(StoreCall::ReleaseLease { .. })
    ));
    assert!(!remote.store.is_leased("state-locks/demo-1.lock"));
}

#[tokio::test]
async fn output_is_persisted_even_when_command_fails() {
    let remote = Remote::new();
    let demo = stack("demo-1");
    remote.seed_initialized(&demo);
    remote
        .runner
        .respond(&["preview"], 1, "Previewing update (demo-1)\nerror: boom\n");
    let dir = tempdir().unwrap();
    let path = dir.path().join("preview.txt");
    let options = DispatchOptions {
        output_file: Some(path.clone()),
        ..DispatchOptions::default()
    };
    let (_, dispatcher) = dispatcher(&remote, Vec::new(), options);

    let err = dispatcher
        .dispatch_command("preview", demo, Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::ToolInvocationFailed { .. }));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Previewing update (demo-1)\nerror: boom\n"
    );
    let preview = remote
        .runner
        .calls()
        .into_iter()
        .find(|c| c.line() == "preview")
        .unwrap();
    assert_eq!(preview.output, OutputMode::Tee);
}

#[tokio::test]
async fn output_file_is_a_byte_for_byte_copy() {
    let remote = Remote::new();
    let demo = stack("demo-1");
    remote.seed_initialized(&demo);
    let raw: &[u8] = b"resource \xe9t\xe9\r\n\xff done\n";
    remote.runner.respond(&["up"], 0, raw);
    let dir = tempdir().unwrap();
    let path = dir.path().join("up.txt");
    let options = DispatchOptions {
        output_file: Some(path.clone()),
        ..DispatchOptions::default()
    };
    let (_, dispatcher) = dispatcher(&remote, Vec::new(), options);

    dispatcher
        .dispatch_command("up", demo, Vec::new())
        .await
        .unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), raw);
}

#[tokio::test]
async fn output_file_is_overwritten() {
    let remote = Remote::new();
    let demo = stack("demo-1");
    remote.seed_initialized(&demo);
    remote.runner.respond(&["refresh"], 0, "fresh\n");
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");
    std::fs::write(&path, "stale output that is longer").unwrap();
    let options = DispatchOptions {
        output_file: Some(path.clone()),
        ..DispatchOptions::default()
    };
    let (_, dispatcher) = dispatcher(&remote, Vec::new(), options);

    let outcome = dispatcher
        .dispatch_command("refresh", demo, Vec::new())
        .await
        .unwrap();

    assert!(matches!(outcome, DispatchOutcome::Completed(ref out) if out.success()));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
}

#[tokio::test]
async fn init_routes_to_init_protocol() {
    let remote = Remote::new();
    let (_, dispatcher) = dispatcher(&remote, Vec::new(), DispatchOptions::default());

    let outcome = dispatcher
        .dispatch_command("stack init", stack("demo-1"), Vec::new())
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Initialized);
    assert!(remote.store.contains("state-locks/demo-1.lock"));
}

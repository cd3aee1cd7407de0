// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

const SAMPLE: &str = r#"
stack = "demo-1"
storage_account = "statestore"
container = "state"
key_vault = "kv-prod"
tool_version = "3.100.0"
stack_name_rule = "allow_periods"

[reconcile]
prefixes = ["CFG_", "APP_"]
include_prefix = true

[variables]
exists = "DEMO_EXISTS"
"#;

#[test]
fn parses_full_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stacklock.toml");
    std::fs::write(&path, SAMPLE).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.require_stack().unwrap(), "demo-1");
    assert_eq!(settings.require_key_vault().unwrap(), "kv-prod");
    assert_eq!(settings.stack_name_rule(), StackNameRule::AllowPeriods);
    assert_eq!(settings.reconcile.prefixes, vec!["CFG_", "APP_"]);
    assert!(settings.include_prefix());
    assert_eq!(settings.variables.exists(), "DEMO_EXISTS");
    assert_eq!(settings.variables.config_status(), "CONFIG_CHANGE_STATUS");
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "stak = \"typo\"\n").unwrap();

    let err = Settings::load(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Parse { .. }));
}

#[test]
fn discover_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::discover(None, dir.path()).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.tool(), PathBuf::from("pulumi"));
    assert_eq!(settings.working_dir(), PathBuf::from("."));
}

#[test]
fn discover_requires_explicit_file() {
    let dir = tempdir().unwrap();
    let err = Settings::discover(Some(&dir.path().join("missing.toml")), dir.path()).unwrap_err();
    assert!(matches!(err, SettingsError::Read { .. }));
}

#[test]
fn overrides_win_over_file_values() {
    let file = Settings {
        stack: Some("from-file".into()),
        container: Some("state".into()),
        reconcile: ReconcileSettings {
            prefixes: vec!["CFG_".into()],
            include_prefix: Some(true),
        },
        ..Default::default()
    };
    let cli = Settings {
        stack: Some("from-cli".into()),
        ..Default::default()
    };

    let merged = file.merge(cli);
    assert_eq!(merged.stack.as_deref(), Some("from-cli"));
    assert_eq!(merged.container.as_deref(), Some("state"));
    assert_eq!(merged.reconcile.prefixes, vec!["CFG_"]);
    assert!(merged.include_prefix());
}

#[test]
fn blank_required_input_is_missing() {
    let settings = Settings {
        key_vault: Some("   ".into()),
        ..Default::default()
    };
    assert_eq!(
        settings.require_key_vault().unwrap_err(),
        ValidationError::MissingInput("key vault")
    );
}

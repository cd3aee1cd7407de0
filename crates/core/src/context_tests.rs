// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn latest_places_no_constraint() {
    let mut ctx = RunContext::new(Some("latest".into()));
    assert!(ctx.requested_tool_version().is_none());
    ctx.record_installed_version("v3.100.0\n").unwrap();
    assert_eq!(ctx.installed_tool_version(), Some("3.100.0"));
}

#[test]
fn matching_version_is_recorded() {
    let mut ctx = RunContext::new(Some("3.100.0".into()));
    ctx.record_installed_version("v3.100.0").unwrap();
    assert_eq!(ctx.installed_tool_version(), Some("3.100.0"));
}

#[test]
fn reported_version_mismatch_fails() {
    let mut ctx = RunContext::new(Some("3.100.0".into()));
    let err = ctx.record_installed_version("v3.99.0").unwrap_err();
    assert_eq!(
        err,
        ValidationError::ToolVersionMismatch {
            requested: "3.100.0".into(),
            installed: "3.99.0".into(),
        }
    );
}

#[test]
fn previously_installed_mismatch_fails() {
    let mut ctx =
        RunContext::new(Some("3.100.0".into())).with_installed_version(Some("3.98.0".into()));
    let err = ctx.record_installed_version("v3.100.0").unwrap_err();
    assert!(matches!(err, ValidationError::ToolVersionMismatch { installed, .. } if installed == "3.98.0"));
}

#[test]
fn contexts_are_independent() {
    let mut a = RunContext::new(None);
    let b = RunContext::new(None);
    a.extend_env([("AZURE_STORAGE_ACCOUNT".to_string(), "stacks".to_string())]);
    assert!(b.tool_env().is_empty());
    assert_ne!(a.run_id, b.run_id);
}

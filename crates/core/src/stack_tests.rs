// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    simple = { "demo" },
    with_dash = { "demo-1" },
    mixed_case = { "Prod-EU-West" },
    two_chars = { "ab" },
)]
fn strict_accepts(name: &str) {
    assert!(validate_stack_name(name, StackNameRule::Strict).is_ok());
}

#[parameterized(
    empty = { "" },
    single_letter = { "a" },
    leading_digit = { "1demo" },
    leading_dash = { "-demo" },
    period = { "demo.eu" },
    underscore = { "demo_1" },
    slash = { "org/demo" },
    space = { "demo 1" },
)]
fn strict_rejects(name: &str) {
    let err = validate_stack_name(name, StackNameRule::Strict).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidStackName { .. }));
}

#[test]
fn periods_allowed_only_with_extended_rule() {
    assert!(validate_stack_name("demo.eu-1", StackNameRule::AllowPeriods).is_ok());
    assert!(validate_stack_name(".demo", StackNameRule::AllowPeriods).is_err());
}

#[test]
fn secret_name_defaults_to_stack_name() {
    let id = StackIdentity::new("demo-1", None, "kv", StackNameRule::Strict).unwrap();
    assert_eq!(id.secret_name, "demo-1");
    assert_eq!(id.vault_name, "kv");

    let id = StackIdentity::new("demo-1", Some("  ".into()), "kv", StackNameRule::Strict).unwrap();
    assert_eq!(id.secret_name, "demo-1");
}

#[test]
fn explicit_secret_name_is_kept() {
    let id = StackIdentity::new(
        "demo-1",
        Some("demo-passphrase".into()),
        "kv",
        StackNameRule::Strict,
    )
    .unwrap();
    assert_eq!(id.secret_name, "demo-passphrase");
}

#[test]
fn invalid_name_error_mentions_name() {
    let err = StackIdentity::new("9lives", None, "kv", StackNameRule::Strict).unwrap_err();
    assert!(err.to_string().contains("9lives"));
}

#[test]
fn dotted_stack_needs_explicit_secret_name() {
    let err = StackIdentity::new("app.dev", None, "kv", StackNameRule::AllowPeriods).unwrap_err();
    assert_eq!(err, ValidationError::InvalidSecretName("app.dev".into()));

    let id = StackIdentity::new(
        "app.dev",
        Some("app-dev".into()),
        "kv",
        StackNameRule::AllowPeriods,
    )
    .unwrap();
    assert_eq!(id.stack_name, "app.dev");
    assert_eq!(id.secret_name, "app-dev");
}

#[parameterized(
    underscore = { "demo_passphrase" },
    period = { "demo.passphrase" },
    slash = { "demo/passphrase" },
    too_long = { "a".repeat(128).leak() },
)]
fn invalid_secret_names_are_rejected(secret: &str) {
    let err = StackIdentity::new("demo-1", Some(secret.into()), "kv", StackNameRule::Strict)
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidSecretName(_)));
}

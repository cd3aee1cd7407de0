// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stack passphrase generation

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;

/// Random bytes drawn per passphrase (512 bits)
pub const PASSPHRASE_BYTES: usize = 64;

pub const ENV_PASSPHRASE: &str = "PULUMI_CONFIG_PASSPHRASE";

/// Secret used by the tool to encrypt stack configuration at rest
#[derive(Clone, PartialEq, Eq)]
pub struct StackPassphrase(String);

impl StackPassphrase {
    /// Draw a fresh passphrase from the OS random source, base64 encoded
    pub fn generate() -> Self {
        let mut bytes = [0u8; PASSPHRASE_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(STANDARD.encode(bytes))
    }

    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for StackPassphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StackPassphrase(***)")
    }
}

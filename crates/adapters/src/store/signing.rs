// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared Key request signing for the blob service

use super::StoreError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Standard headers in string-to-sign order
const SIGNED_STANDARD_HEADERS: [&str; 11] = [
    "content-encoding",
    "content-language",
    "content-length",
    "content-md5",
    "content-type",
    "date",
    "if-modified-since",
    "if-match",
    "if-none-match",
    "if-unmodified-since",
    "range",
];

/// Signs blob requests with the storage account access key
#[derive(Clone)]
pub struct SharedKeySigner {
    account: String,
    mac: HmacSha256,
}

impl SharedKeySigner {
    pub fn new(account: impl Into<String>, base64_key: &str) -> Result<Self, StoreError> {
        let key = STANDARD
            .decode(base64_key.trim())
            .map_err(|e| StoreError::InvalidKey(e.to_string()))?;
        let mac =
            HmacSha256::new_from_slice(&key).map_err(|e| StoreError::InvalidKey(e.to_string()))?;
        Ok(Self {
            account: account.into(),
            mac,
        })
    }

    /// Build the canonical string-to-sign.
    ///
    /// `headers` are lowercase names; `path` is the URL path as sent;
    /// `query` holds the raw query parameters.
    pub fn string_to_sign(
        &self,
        method: &str,
        headers: &[(String, String)],
        path: &str,
        query: &[(&str, &str)],
    ) -> String {
        let lookup = |name: &str| {
            headers
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
                .unwrap_or("")
        };

        let mut out = String::new();
        out.push_str(method);
        out.push('\n');
        for name in SIGNED_STANDARD_HEADERS {
            let value = lookup(name);
            // A zero content length is signed as empty
            if name == "content-length" && value == "0" {
                out.push('\n');
                continue;
            }
            out.push_str(value);
            out.push('\n');
        }

        let mut ms_headers: Vec<(&str, &str)> = headers
            .iter()
            .filter(|(k, _)| k.starts_with("x-ms-"))
            .map(|(k, v)| (k.as_str(), v.trim()))
            .collect();
        ms_headers.sort();
        for (k, v) in ms_headers {
            out.push_str(k);
            out.push(':');
            out.push_str(v);
            out.push('\n');
        }

        out.push('/');
        out.push_str(&self.account);
        out.push_str(path);

        let mut params: Vec<(String, &str)> = query
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), *v))
            .collect();
        params.sort();
        for (k, v) in params {
            out.push('\n');
            out.push_str(&k);
            out.push(':');
            out.push_str(v);
        }

        out
    }

    pub fn sign(&self, string_to_sign: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(string_to_sign.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self, string_to_sign: &str) -> String {
        format!("SharedKey {}:{}", self.account, self.sign(string_to_sign))
    }
}

impl fmt::Debug for SharedKeySigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedKeySigner")
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "signing_tests.rs"]
mod tests;

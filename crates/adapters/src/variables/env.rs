// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::VariableSource;
use sl_core::ExternalVariable;
use std::collections::BTreeMap;

/// Environment prefix marking a secret pipeline variable
pub const SECRET_PREFIX: &str = "SECRET_";

/// Variables taken from environment pairs.
///
/// `SECRET_<NAME>` is surfaced as `<NAME>` flagged secret and wins over a
/// plain `<NAME>`.
#[derive(Clone, Debug, Default)]
pub struct EnvVariableSource {
    vars: Vec<ExternalVariable>,
}

impl EnvVariableSource {
    /// Snapshot of the current process environment
    pub fn from_process() -> Self {
        Self::from_pairs(std::env::vars())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut by_name: BTreeMap<String, ExternalVariable> = BTreeMap::new();
        for (name, value) in pairs {
            let name = name.into();
            let value = value.into();
            let secret_name = name
                .strip_prefix(SECRET_PREFIX)
                .filter(|bare| !bare.is_empty())
                .map(str::to_string);
            match secret_name {
                Some(bare) => {
                    by_name.insert(bare.clone(), ExternalVariable::secret(bare, value));
                }
                None => {
                    let secret_present = by_name.get(&name).is_some_and(|v| v.is_secret);
                    if !secret_present {
                        by_name.insert(name.clone(), ExternalVariable::plain(name, value));
                    }
                }
            }
        }
        Self {
            vars: by_name.into_values().collect(),
        }
    }
}

impl VariableSource for EnvVariableSource {
    fn variables(&self) -> Vec<ExternalVariable> {
        self.vars.clone()
    }
}

//! Environment table merging.
//!
//! Combines a base `KEY=VALUE` table with the manifest-declared environment
//! under defined precedence: a base entry whose key is declared in the
//! manifest is overwritten; retained base entries keep their original order
//! and all declared entries follow in declaration order.
//!
//! Entries loaded from a trusted env source file therefore cannot override
//! manifest-declared entries, only the reverse. Re-running the merge against
//! its own output can duplicate declared keys; neither behavior is "fixed"
//! here — both are the current contract.

use std::collections::HashSet;

use crate::error::{BootError, BootResult};
use crate::manifest::{KEY_ENV, ManifestPolicy};

/// Non-mutating split of a `KEY=VALUE` entry at the first `=`.
pub fn split_env_entry(entry: &str) -> Option<(&str, &str)> {
    entry.split_once('=')
}

/// Merge `original` with `declared`, producing the finalized table.
///
/// `len(result) == len(original) + len(declared) - |overlap|` where overlap
/// counts original keys also present in `declared`. An empty `declared`
/// returns `original` unchanged without inspecting its entries; otherwise a
/// base entry missing `=` is an invalid-input error.
pub fn merge_env(original: &[String], declared: &[(String, String)]) -> BootResult<Vec<String>> {
    if declared.is_empty() {
        return Ok(original.to_vec());
    }

    let declared_keys: HashSet<&str> = declared.iter().map(|(key, _)| key.as_str()).collect();

    let mut merged = Vec::with_capacity(original.len() + declared.len());
    for entry in original {
        let Some((key, _value)) = split_env_entry(entry) else {
            return Err(BootError::MalformedEnvEntry {
                entry: entry.clone(),
            });
        };
        if !declared_keys.contains(key) {
            merged.push(entry.clone());
        }
    }
    for (key, value) in declared {
        merged.push(format!("{key}={value}"));
    }
    Ok(merged)
}

/// Extract the `loader.env` table as ordered `(key, value)` pairs.
///
/// Declaration order is preserved by the underlying tree; every value must
/// be a string.
pub fn declared_env(manifest: &ManifestPolicy) -> BootResult<Vec<(String, String)>> {
    let Some(table) = manifest.get_table(KEY_ENV)? else {
        return Ok(Vec::new());
    };
    let mut entries = Vec::with_capacity(table.len());
    for (key, value) in table {
        let Some(value) = value.as_str() else {
            return Err(BootError::BadValue {
                key: KEY_ENV,
                reason: "every entry must be a string",
            });
        };
        entries.push((key.clone(), value.to_string()));
    }
    Ok(entries)
}

//! Typed accessors over the parsed manifest tree.
//!
//! The manifest grammar itself is not this crate's business: a generic
//! key/value tree ([`toml::Table`]) is assumed available. This module only
//! enforces value shape. Absence of a key yields the stated default, never a
//! guess; a present key of the wrong type is a configuration error.

use toml::{Table, Value};

use crate::error::{BootError, BootResult};

/// `loader.preload` — comma-separated preload library URIs.
pub const KEY_PRELOAD: &str = "loader.preload";
/// `loader.env` — declared environment overrides/additions.
pub const KEY_ENV: &str = "loader.env";
/// `loader.debug_type` — debug sink selector (`inline`, `file`, `none`).
pub const KEY_DEBUG_TYPE: &str = "loader.debug_type";
/// `loader.debug_file` — sink path, required when `debug_type = "file"`.
pub const KEY_DEBUG_FILE: &str = "loader.debug_file";
/// `loader.insecure__disable_aslr` — disables address-layout randomization.
pub const KEY_DISABLE_ASLR: &str = "loader.insecure__disable_aslr";
/// `loader.argv0_override` — forces slot 0 of argv.
pub const KEY_ARGV0_OVERRIDE: &str = "loader.argv0_override";
/// `loader.insecure__use_cmdline_argv` — trusts host-supplied argv.
pub const KEY_USE_CMDLINE_ARGV: &str = "loader.insecure__use_cmdline_argv";
/// `loader.argv_src_file` — trusted source of the full argv.
pub const KEY_ARGV_SRC_FILE: &str = "loader.argv_src_file";
/// `loader.insecure__use_host_env` — trusts the host environment.
pub const KEY_USE_HOST_ENV: &str = "loader.insecure__use_host_env";
/// `loader.env_src_file` — trusted source of environment entries.
pub const KEY_ENV_SRC_FILE: &str = "loader.env_src_file";
/// `loader.exec` — removed; presence is always fatal.
pub const KEY_EXEC_DEPRECATED: &str = "loader.exec";

/// Immutable manifest with typed, dotted-key accessors.
#[derive(Debug, Clone)]
pub struct ManifestPolicy {
    root: Table,
}

impl ManifestPolicy {
    /// Parse manifest text into a policy tree.
    pub fn parse(uri: &str, text: &str) -> BootResult<Self> {
        let root = text
            .parse::<Table>()
            .map_err(|source| BootError::ManifestSyntax {
                uri: uri.to_string(),
                source,
            })?;
        Ok(Self { root })
    }

    /// Wrap an already-parsed tree.
    pub fn from_table(root: Table) -> Self {
        Self { root }
    }

    /// Walk a dotted key through nested tables.
    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut table = &self.root;
        let mut segments = key.split('.').peekable();
        while let Some(segment) = segments.next() {
            let value = table.get(segment)?;
            if segments.peek().is_none() {
                return Some(value);
            }
            table = value.as_table()?;
        }
        None
    }

    /// String-typed value; `None` when the key is absent.
    pub fn get_string(&self, key: &'static str) -> BootResult<Option<String>> {
        match self.lookup(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(BootError::BadValue {
                key,
                reason: "the value must be a string",
            }),
        }
    }

    /// Boolean encoded as integer 0 or 1. Any other value — including a
    /// native boolean — is a configuration error.
    pub fn get_bool01(&self, key: &'static str, default: bool) -> BootResult<bool> {
        match self.lookup(key) {
            None => Ok(default),
            Some(Value::Integer(0)) => Ok(false),
            Some(Value::Integer(1)) => Ok(true),
            Some(_) => Err(BootError::BadValue {
                key,
                reason: "the value must be 0 or 1",
            }),
        }
    }

    /// Table-typed value; `None` when the key is absent.
    pub fn get_table(&self, key: &'static str) -> BootResult<Option<&Table>> {
        match self.lookup(key) {
            None => Ok(None),
            Some(Value::Table(table)) => Ok(Some(table)),
            Some(_) => Err(BootError::BadValue {
                key,
                reason: "the value must be a table",
            }),
        }
    }

    /// Reject manifests still carrying removed options. `loader.exec` is
    /// fatal whenever present, regardless of its value.
    pub fn reject_deprecated(&self) -> BootResult<()> {
        if self.lookup(KEY_EXEC_DEPRECATED).is_some() {
            return Err(BootError::DeprecatedKey {
                key: KEY_EXEC_DEPRECATED,
            });
        }
        Ok(())
    }
}

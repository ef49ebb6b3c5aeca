//! Bootstrap trust policy.
//!
//! [`BootstrapPolicy`] is computed from the manifest exactly once, before
//! any host-controlled argv or environment is accepted, and is immutable for
//! the process lifetime. Mutual-exclusion rules are enforced here, at
//! construction — a violating manifest never reaches the point where list
//! I/O would happen.

use crate::error::{BootError, BootResult};
use crate::host::DEBUG_SINK_INLINE_URI;
use crate::manifest::{
    KEY_ARGV0_OVERRIDE, KEY_ARGV_SRC_FILE, KEY_DEBUG_FILE, KEY_DEBUG_TYPE, KEY_DISABLE_ASLR,
    KEY_ENV_SRC_FILE, KEY_USE_CMDLINE_ARGV, KEY_USE_HOST_ENV, ManifestPolicy,
};

/// The manifest-derived trust settings governing input acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapPolicy {
    /// Disable address-layout randomization (insecure).
    pub disable_aslr: bool,
    /// Trust the host-supplied argv (insecure).
    pub use_cmdline_argv: bool,
    /// Trust the host-supplied environment (insecure).
    pub use_host_env: bool,
    /// Forced value for argv slot 0.
    pub argv0_override: Option<String>,
    /// Trusted source of the full argv.
    pub argv_src_file: Option<String>,
    /// Trusted source of environment entries.
    pub env_src_file: Option<String>,
}

impl BootstrapPolicy {
    /// Read every policy key and enforce the mutual-exclusion rules.
    pub fn from_manifest(manifest: &ManifestPolicy) -> BootResult<Self> {
        let policy = Self {
            disable_aslr: manifest.get_bool01(KEY_DISABLE_ASLR, false)?,
            use_cmdline_argv: manifest.get_bool01(KEY_USE_CMDLINE_ARGV, false)?,
            use_host_env: manifest.get_bool01(KEY_USE_HOST_ENV, false)?,
            argv0_override: manifest.get_string(KEY_ARGV0_OVERRIDE)?,
            argv_src_file: manifest.get_string(KEY_ARGV_SRC_FILE)?,
            env_src_file: manifest.get_string(KEY_ENV_SRC_FILE)?,
        };
        if policy.use_host_env && policy.env_src_file.is_some() {
            return Err(BootError::PolicyViolation(
                "cannot use insecure__use_host_env and env_src_file at the same time",
            ));
        }
        Ok(policy)
    }
}

/// Debug sink selection — configuration surface only; opening the sink is
/// the host runtime's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugSink {
    /// No debug output.
    None,
    /// The host console device.
    Inline,
    /// A named file resource.
    File(String),
}

impl DebugSink {
    /// Resolve `loader.debug_type` / `loader.debug_file`.
    pub fn from_manifest(manifest: &ManifestPolicy) -> BootResult<Self> {
        match manifest.get_string(KEY_DEBUG_TYPE)?.as_deref() {
            None | Some("none") => Ok(Self::None),
            Some("inline") => Ok(Self::Inline),
            Some("file") => match manifest.get_string(KEY_DEBUG_FILE)? {
                Some(uri) => Ok(Self::File(uri)),
                None => Err(BootError::BadValue {
                    key: KEY_DEBUG_FILE,
                    reason: "required when debug_type is \"file\"",
                }),
            },
            Some(_) => Err(BootError::BadValue {
                key: KEY_DEBUG_TYPE,
                reason: "allowed values: `inline`, `file`, `none`",
            }),
        }
    }

    /// URI the runtime should open for this sink, if any.
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Inline => Some(DEBUG_SINK_INLINE_URI),
            Self::File(uri) => Some(uri),
        }
    }
}

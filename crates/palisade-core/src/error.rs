//! Bootstrap error taxonomy.
//!
//! Every failure in this crate is fatal to the bootstrap: a half-initialized
//! trust boundary cannot be resumed, so errors thread back unchanged to the
//! single top-level caller, which logs them and terminates the process.
//! There is no retry path and no partial continuation.

use std::io;

use thiserror::Error;

/// Result alias used throughout the bootstrap stage.
pub type BootResult<T> = Result<T, BootError>;

/// A fatal bootstrap failure.
#[derive(Debug, Error)]
pub enum BootError {
    /// A manifest value has the wrong type or shape.
    #[error("cannot parse '{key}': {reason}")]
    BadValue {
        key: &'static str,
        reason: &'static str,
    },

    /// A removed manifest option is still present.
    #[error("'{key}' is not supported anymore; update the manifest to the current syntax")]
    DeprecatedKey { key: &'static str },

    /// The manifest text failed to parse as a config tree.
    #[error("cannot parse manifest '{uri}': {source}")]
    ManifestSyntax {
        uri: String,
        #[source]
        source: toml::de::Error,
    },

    /// Mutually exclusive or under-specified trust options.
    #[error("invalid loader configuration: {0}")]
    PolicyViolation(&'static str),

    /// The host entry glue supplied neither a manifest nor an executable.
    #[error("must supply a manifest or an executable")]
    MissingEntryInput,

    /// No manifest could be located for the given executable.
    #[error("no manifest found for '{exec_uri}'")]
    ManifestNotFound { exec_uri: String },

    /// The resolved executable does not carry the binary-object magic.
    #[error("'{uri}' is not a recognized executable")]
    NotAnExecutable { uri: String },

    /// Failure in the trusted stream layer.
    #[error("cannot access '{uri}': {source}")]
    Stream {
        uri: String,
        #[source]
        source: io::Error,
    },

    /// Resource contents violate an expected wire format.
    #[error("'{uri}': {reason}")]
    InvalidFormat {
        uri: String,
        reason: &'static str,
    },

    /// An environment entry without a `=` separator.
    #[error("malformed environment entry '{entry}': missing '='")]
    MalformedEnvEntry { entry: String },
}

impl BootError {
    /// Wrap a stream-layer failure, keeping the originating error kind.
    pub fn stream(uri: &str, source: io::Error) -> Self {
        Self::Stream {
            uri: uri.to_string(),
            source,
        }
    }

    /// Wire-format violation in the resource at `uri`.
    pub fn invalid_format(uri: &str, reason: &'static str) -> Self {
        Self::InvalidFormat {
            uri: uri.to_string(),
            reason,
        }
    }
}

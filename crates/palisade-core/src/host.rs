//! Narrow seams to the untrusted-host collaborators.
//!
//! The bootstrap stage never opens, reads, or maps anything itself. All I/O
//! goes through [`TrustedChannel`] (a path whose contents are accepted
//! because trust was established out of band, e.g. integrity-protected
//! storage) and all binary-object loading through [`ObjectLoader`]. Both
//! traits are synchronous and blocking; bootstrap runs single-threaded
//! before any application thread exists.

use std::io;

/// Scheme prefix of the file namespace.
pub const URI_PREFIX_FILE: &str = "file:";

/// Scheme prefix of the device namespace.
pub const URI_PREFIX_DEV: &str = "dev:";

/// Fallback manifest looked up in the base namespace when no manifest can be
/// derived from the executable name.
pub const DEFAULT_MANIFEST_URI: &str = "file:manifest";

/// Host console device backing the inline debug sink.
pub const DEBUG_SINK_INLINE_URI: &str = "dev:tty";

/// Read primitives over a trusted, integrity-protected channel.
///
/// Contents read here are accepted without further verification; only their
/// format is checked by the callers. Failures propagate with the
/// originating [`io::Error`] so the operator sees the real cause.
pub trait TrustedChannel {
    /// Cheap existence check, used while resolving the manifest/executable
    /// pair. Must not read resource contents.
    fn probe(&self, uri: &str) -> io::Result<()>;

    /// Read the entire resource into an owned buffer.
    fn read_all(&self, uri: &str) -> io::Result<Vec<u8>>;

    /// Read at most `max_len` leading bytes of the resource. A shorter
    /// resource yields a shorter buffer, not an error.
    fn read_prefix(&self, uri: &str, max_len: usize) -> io::Result<Vec<u8>>;
}

/// Binary-object loading, performed by the runtime outside this stage.
pub trait ObjectLoader {
    /// Load one preload library. Called strictly in list order; the first
    /// failure aborts the bootstrap with earlier libraries left in place.
    fn load_preload(&mut self, uri: &str) -> io::Result<()>;

    /// Load the main executable. `image` carries the pre-loaded bytes when
    /// the host entry glue already mapped the executable.
    fn load_executable(&mut self, uri: &str, image: Option<&[u8]>) -> io::Result<()>;
}

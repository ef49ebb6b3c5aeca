//! Filesystem-backed host doubles.
//!
//! [`DirChannel`] maps the `file:` namespace onto a root directory so
//! fixture trees on the developer host stand in for the trusted channel.
//! The `dev:` namespace has no fixture backing and reports `Unsupported`.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use palisade_core::host::URI_PREFIX_FILE;
use palisade_core::{ObjectLoader, TrustedChannel};

/// Trusted channel rooted at a fixture directory.
#[derive(Debug, Clone)]
pub struct DirChannel {
    root: PathBuf,
}

impl DirChannel {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, uri: &str) -> io::Result<PathBuf> {
        let Some(rest) = uri.strip_prefix(URI_PREFIX_FILE) else {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("unsupported URI scheme: {uri}"),
            ));
        };
        Ok(self.root.join(rest.trim_start_matches('/')))
    }
}

impl TrustedChannel for DirChannel {
    fn probe(&self, uri: &str) -> io::Result<()> {
        fs::metadata(self.path_for(uri)?).map(|_| ())
    }

    fn read_all(&self, uri: &str) -> io::Result<Vec<u8>> {
        fs::read(self.path_for(uri)?)
    }

    fn read_prefix(&self, uri: &str, max_len: usize) -> io::Result<Vec<u8>> {
        let file = fs::File::open(self.path_for(uri)?)?;
        let mut buf = Vec::with_capacity(max_len);
        file.take(max_len as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// Object loader that records load requests in order instead of mapping
/// binaries into the process.
#[derive(Debug, Default)]
pub struct RecordingLoader {
    /// Preload URIs, in load order.
    pub preloads: Vec<String>,
    /// The main executable URI, once requested.
    pub executable: Option<String>,
    /// Whether the executable came with a pre-loaded image.
    pub executable_from_image: bool,
}

impl ObjectLoader for RecordingLoader {
    fn load_preload(&mut self, uri: &str) -> io::Result<()> {
        self.preloads.push(uri.to_string());
        Ok(())
    }

    fn load_executable(&mut self, uri: &str, image: Option<&[u8]>) -> io::Result<()> {
        self.executable = Some(uri.to_string());
        self.executable_from_image = image.is_some();
        Ok(())
    }
}

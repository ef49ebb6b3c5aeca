//! In-memory host doubles shared across unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

use crate::host::{ObjectLoader, TrustedChannel};

/// A minimal ELF header prefix for executables in fixtures.
pub const ELF_STUB: &[u8] = b"\x7fELF\x02\x01\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00";

/// Map-backed trusted channel that records which resources were read.
#[derive(Debug, Default)]
pub struct MemChannel {
    resources: HashMap<String, Vec<u8>>,
    reads: RefCell<Vec<String>>,
}

impl MemChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, uri: &str, bytes: Vec<u8>) {
        self.resources.insert(uri.to_string(), bytes);
    }

    /// URIs whose contents were read (probes are not reads).
    pub fn reads(&self) -> Vec<String> {
        self.reads.borrow().clone()
    }

    fn fetch(&self, uri: &str) -> io::Result<&Vec<u8>> {
        self.resources
            .get(uri)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no resource: {uri}")))
    }
}

impl TrustedChannel for MemChannel {
    fn probe(&self, uri: &str) -> io::Result<()> {
        self.fetch(uri).map(|_| ())
    }

    fn read_all(&self, uri: &str) -> io::Result<Vec<u8>> {
        let bytes = self.fetch(uri)?.clone();
        self.reads.borrow_mut().push(uri.to_string());
        Ok(bytes)
    }

    fn read_prefix(&self, uri: &str, max_len: usize) -> io::Result<Vec<u8>> {
        let bytes = self.fetch(uri)?;
        self.reads.borrow_mut().push(uri.to_string());
        Ok(bytes[..bytes.len().min(max_len)].to_vec())
    }
}

/// Object loader that records requests instead of mapping binaries.
#[derive(Debug, Default)]
pub struct MemLoader {
    pub preloads: Vec<String>,
    pub executable: Option<String>,
    pub executable_from_image: bool,
    /// When set, loading this preload URI fails.
    pub fail_preload: Option<String>,
}

impl ObjectLoader for MemLoader {
    fn load_preload(&mut self, uri: &str) -> io::Result<()> {
        if self.fail_preload.as_deref() == Some(uri) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("refusing to load {uri}"),
            ));
        }
        self.preloads.push(uri.to_string());
        Ok(())
    }

    fn load_executable(&mut self, uri: &str, image: Option<&[u8]>) -> io::Result<()> {
        self.executable = Some(uri.to_string());
        self.executable_from_image = image.is_some();
        Ok(())
    }
}

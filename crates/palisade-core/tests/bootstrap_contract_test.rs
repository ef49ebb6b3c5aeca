//! Integration test: bootstrap trust contract.
//!
//! Exercises the public bootstrap API end-to-end against an in-memory host,
//! covering the fail-closed rules an untrusted host must not be able to
//! sidestep.
//!
//! Run: cargo test -p palisade-core --test bootstrap_contract_test

use std::collections::HashMap;
use std::io;

use palisade_core::{
    BootError, Bootstrap, BootstrapRequest, ObjectLoader, TrustedChannel,
};

const ELF_STUB: &[u8] = b"\x7fELF\x02\x01\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00";

// ---------------------------------------------------------------------------
// Host doubles
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FixtureHost {
    resources: HashMap<String, Vec<u8>>,
}

impl FixtureHost {
    fn with(mut self, uri: &str, bytes: &[u8]) -> Self {
        self.resources.insert(uri.to_string(), bytes.to_vec());
        self
    }

    fn fetch(&self, uri: &str) -> io::Result<&Vec<u8>> {
        self.resources
            .get(uri)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, uri.to_string()))
    }
}

impl TrustedChannel for FixtureHost {
    fn probe(&self, uri: &str) -> io::Result<()> {
        self.fetch(uri).map(|_| ())
    }

    fn read_all(&self, uri: &str) -> io::Result<Vec<u8>> {
        self.fetch(uri).cloned()
    }

    fn read_prefix(&self, uri: &str, max_len: usize) -> io::Result<Vec<u8>> {
        let bytes = self.fetch(uri)?;
        Ok(bytes[..bytes.len().min(max_len)].to_vec())
    }
}

#[derive(Default)]
struct NullLoader {
    preloads: Vec<String>,
}

impl ObjectLoader for NullLoader {
    fn load_preload(&mut self, uri: &str) -> io::Result<()> {
        self.preloads.push(uri.to_string());
        Ok(())
    }

    fn load_executable(&mut self, _uri: &str, _image: Option<&[u8]>) -> io::Result<()> {
        Ok(())
    }
}

fn request(manifest: Option<&str>, exec: Option<&str>, args: &[&str]) -> BootstrapRequest<'static> {
    BootstrapRequest {
        instance_id: 1,
        manifest_uri: manifest.map(str::to_owned),
        executable_uri: exec.map(str::to_owned),
        executable_image: None,
        args: args.iter().map(|s| s.to_string()).collect(),
        envs: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// 1. Resolver contract
// ---------------------------------------------------------------------------

#[test]
fn manifest_name_resolves_sibling_executable() {
    let host = FixtureHost::default()
        .with("file:foo.manifest", b"[loader]\nargv0_override = \"foo\"\n")
        .with("file:foo", ELF_STUB);
    let mut loader = NullLoader::default();
    let result = Bootstrap::new(&host, &mut loader)
        .run(request(Some("file:foo.manifest"), None, &["foo"]))
        .unwrap();
    assert_eq!(result.executable_uri.as_deref(), Some("file:foo"));
}

#[test]
fn executable_name_resolves_sibling_manifest() {
    let host = FixtureHost::default()
        .with("file:foo", ELF_STUB)
        .with("file:foo.manifest", b"[loader]\nargv0_override = \"foo\"\n");
    let mut loader = NullLoader::default();
    let result = Bootstrap::new(&host, &mut loader)
        .run(request(None, Some("file:foo"), &["foo"]))
        .unwrap();
    assert_eq!(result.manifest_uri, "file:foo.manifest");
}

#[test]
fn missing_both_inputs_is_an_entry_contract_violation() {
    let host = FixtureHost::default();
    let mut loader = NullLoader::default();
    let err = Bootstrap::new(&host, &mut loader)
        .run(request(None, None, &[]))
        .unwrap_err();
    assert!(matches!(err, BootError::MissingEntryInput));
}

// ---------------------------------------------------------------------------
// 2. Untrusted data never crosses without opt-in
// ---------------------------------------------------------------------------

#[test]
fn host_argv_and_env_are_rejected_without_explicit_policy() {
    let host = FixtureHost::default()
        .with("file:foo.manifest", b"")
        .with("file:foo", ELF_STUB);
    let mut loader = NullLoader::default();
    let err = Bootstrap::new(&host, &mut loader)
        .run(request(Some("file:foo.manifest"), None, &["foo", "--inject"]))
        .unwrap_err();
    assert!(matches!(err, BootError::PolicyViolation(_)));
}

#[test]
fn argv0_override_never_admits_extra_host_args() {
    let host = FixtureHost::default()
        .with("file:foo.manifest", b"[loader]\nargv0_override = \"safe\"\n")
        .with("file:foo", ELF_STUB);

    let mut loader = NullLoader::default();
    let ok = Bootstrap::new(&host, &mut loader)
        .run(request(Some("file:foo.manifest"), None, &["foo"]))
        .unwrap();
    assert_eq!(ok.argv, vec!["safe"]);

    let mut loader = NullLoader::default();
    let err = Bootstrap::new(&host, &mut loader)
        .run(request(
            Some("file:foo.manifest"),
            None,
            &["foo", "--smuggled"],
        ))
        .unwrap_err();
    assert!(matches!(err, BootError::PolicyViolation(_)));
}

// ---------------------------------------------------------------------------
// 3. Trusted sources
// ---------------------------------------------------------------------------

#[test]
fn trusted_argv_and_env_files_feed_the_result() {
    let host = FixtureHost::default()
        .with(
            "file:foo.manifest",
            b"[loader]\n\
              argv_src_file = \"file:argv\"\n\
              env_src_file = \"file:env\"\n\
              preload = \"file:libpre\"\n",
        )
        .with("file:foo", ELF_STUB)
        .with("file:argv", b"foo\0--trusted\0")
        .with("file:env", b"HOME=/srv\0");
    let mut loader = NullLoader::default();
    let result = Bootstrap::new(&host, &mut loader)
        .run(request(Some("file:foo.manifest"), None, &["ignored"]))
        .unwrap();
    assert_eq!(result.argv, vec!["foo", "--trusted"]);
    assert_eq!(result.envp, vec!["HOME=/srv"]);
    assert_eq!(loader.preloads, vec!["file:libpre"]);
}

#[test]
fn truncated_argv_file_is_rejected_whole() {
    let host = FixtureHost::default()
        .with(
            "file:foo.manifest",
            b"[loader]\nargv_src_file = \"file:argv\"\n",
        )
        .with("file:foo", ELF_STUB)
        .with("file:argv", b"foo\0--cut");
    let mut loader = NullLoader::default();
    let err = Bootstrap::new(&host, &mut loader)
        .run(request(Some("file:foo.manifest"), None, &["x"]))
        .unwrap_err();
    assert!(matches!(err, BootError::InvalidFormat { .. }));
}

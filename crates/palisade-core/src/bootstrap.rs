//! Bootstrap orchestration.
//!
//! Sequences resolution, policy evaluation, and data acquisition into one
//! immutable [`BootstrapResult`]. The sequence is strictly top-down and
//! single-pass; every intermediate value is owned here until folded into the
//! result, and any failure aborts the whole bootstrap — no partial result is
//! ever published.

use log::{info, warn};

use crate::env::{declared_env, merge_env};
use crate::error::{BootError, BootResult};
use crate::host::{ObjectLoader, TrustedChannel};
use crate::manifest::{KEY_PRELOAD, ManifestPolicy};
use crate::policy::{BootstrapPolicy, DebugSink};
use crate::preload::load_preload_libraries;
use crate::resolve::resolve_images;
use crate::strlist::load_string_list;

const ARGV_NOT_CONFIGURED: &str =
    "argv handling is not configured in the manifest, but command-line arguments were given";

/// Fixed per-process inputs handed over by the host entry glue.
///
/// The glue invokes the bootstrap exactly once; it either hands off to
/// execution with the returned result or terminates the process on error.
#[derive(Debug)]
pub struct BootstrapRequest<'a> {
    /// Identifier of this loader instance.
    pub instance_id: u64,
    /// Manifest URI, when the host already opened one.
    pub manifest_uri: Option<String>,
    /// Executable URI, when the host already opened one.
    pub executable_uri: Option<String>,
    /// Executable bytes, when the host already mapped the image.
    pub executable_image: Option<&'a [u8]>,
    /// Host-supplied argument list (untrusted).
    pub args: Vec<String>,
    /// Host-supplied environment list (untrusted).
    pub envs: Vec<String>,
}

/// The finalized, immutable snapshot handed to the rest of the runtime.
///
/// Published exactly once, after every policy decision has been made; all
/// writes strictly precede all reads, so the value may be freely shared by
/// reference across threads spawned afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapResult {
    pub instance_id: u64,
    pub argv: Vec<String>,
    pub envp: Vec<String>,
    pub disable_aslr: bool,
    pub executable_uri: Option<String>,
    pub manifest_uri: String,
    pub debug_sink: DebugSink,
}

/// The bootstrap context: the trusted channel and object loader seams,
/// threaded by reference through every phase.
pub struct Bootstrap<'h> {
    channel: &'h dyn TrustedChannel,
    loader: &'h mut dyn ObjectLoader,
}

impl<'h> Bootstrap<'h> {
    pub fn new(channel: &'h dyn TrustedChannel, loader: &'h mut dyn ObjectLoader) -> Self {
        Self { channel, loader }
    }

    /// Run the full bootstrap sequence.
    ///
    /// Order matters: the whole [`BootstrapPolicy`] is computed (and its
    /// mutual exclusions enforced) before any host-controlled argv or
    /// environment is accepted and before any list I/O.
    pub fn run(self, request: BootstrapRequest<'_>) -> BootResult<BootstrapResult> {
        let resolved = resolve_images(
            self.channel,
            request.manifest_uri,
            request.executable_uri,
            request.executable_image,
        )?;

        let manifest = self.load_manifest(&resolved.manifest_uri)?;
        manifest.reject_deprecated()?;

        let policy = BootstrapPolicy::from_manifest(&manifest)?;

        let argv = self.resolve_argv(&policy, request.args)?;
        let envp = self.resolve_env(&policy, &manifest, request.envs)?;

        load_preload_libraries(manifest.get_string(KEY_PRELOAD)?.as_deref(), &mut *self.loader)?;

        if let Some(exec_uri) = resolved.executable_uri.as_deref() {
            self.loader
                .load_executable(exec_uri, request.executable_image)
                .map_err(|source| BootError::stream(exec_uri, source))?;
        }

        let debug_sink = DebugSink::from_manifest(&manifest)?;

        Ok(BootstrapResult {
            instance_id: request.instance_id,
            argv,
            envp,
            disable_aslr: policy.disable_aslr,
            executable_uri: resolved.executable_uri,
            manifest_uri: resolved.manifest_uri,
            debug_sink,
        })
    }

    fn load_manifest(&self, uri: &str) -> BootResult<ManifestPolicy> {
        let bytes = self
            .channel
            .read_all(uri)
            .map_err(|source| BootError::stream(uri, source))?;
        let text = String::from_utf8(bytes)
            .map_err(|_| BootError::invalid_format(uri, "manifest is not valid UTF-8"))?;
        ManifestPolicy::parse(uri, &text)
    }

    /// Exactly one argv source must apply, or the bootstrap fails closed.
    fn resolve_argv(
        &self,
        policy: &BootstrapPolicy,
        host_args: Vec<String>,
    ) -> BootResult<Vec<String>> {
        let argv = if policy.use_cmdline_argv {
            warn!(
                "using insecure command-line argv source; \
                 do not use this configuration in production"
            );
            host_args
        } else if let Some(src_uri) = policy.argv_src_file.as_deref() {
            if host_args.len() > 1 {
                info!(
                    "discarding {} command-line argument(s); argv comes from '{src_uri}'",
                    host_args.len() - 1
                );
            }
            load_string_list(self.channel, src_uri)?.to_vec()
        } else if let Some(argv0) = policy.argv0_override.as_deref() {
            if host_args.len() > 1 {
                return Err(BootError::PolicyViolation(ARGV_NOT_CONFIGURED));
            }
            vec![argv0.to_string()]
        } else {
            return Err(BootError::PolicyViolation(ARGV_NOT_CONFIGURED));
        };

        if argv.is_empty() {
            return Err(BootError::PolicyViolation(
                "finalized argument vector is empty",
            ));
        }
        Ok(argv)
    }

    /// Build the working table from the configured source, then merge the
    /// manifest-declared entries over it.
    fn resolve_env(
        &self,
        policy: &BootstrapPolicy,
        manifest: &ManifestPolicy,
        host_envs: Vec<String>,
    ) -> BootResult<Vec<String>> {
        let base = if policy.use_host_env {
            warn!(
                "forwarding host environment variables to the application; \
                 do not use this configuration in production"
            );
            host_envs
        } else {
            Vec::new()
        };

        // use_host_env and env_src_file are mutually exclusive; the policy
        // constructor already rejected that combination.
        let base = match policy.env_src_file.as_deref() {
            Some(src_uri) => load_string_list(self.channel, src_uri)?.to_vec(),
            None => base,
        };

        merge_env(&base, &declared_env(manifest)?)
    }
}

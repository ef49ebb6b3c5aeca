//! Manifest/executable pair resolution.
//!
//! The host entry glue may supply a manifest, an executable, or both. This
//! module derives the missing half of the pair from the one that is present
//! — once, with no retries — and verifies that whatever executable ends up
//! resolved is actually a recognized binary object.

use crate::elf;
use crate::error::{BootError, BootResult};
use crate::host::{DEFAULT_MANIFEST_URI, TrustedChannel};
use crate::uri;

/// Plain manifest suffix appended to a normalized executable name.
pub const MANIFEST_SUFFIX: &str = ".manifest";

/// Platform-qualified manifest suffix.
pub const MANIFEST_SUFFIX_PLATFORM: &str = ".manifest.sgx";

/// The resolved pair. `executable_uri` stays `None` when the manifest name
/// carries no recognized suffix to strip; the downstream runtime then
/// locates the executable itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImages {
    pub manifest_uri: String,
    pub executable_uri: Option<String>,
}

/// Resolve the (manifest, executable) pair from whichever inputs are
/// present. All transitions are terminal; failure aborts the bootstrap.
pub fn resolve_images(
    channel: &dyn TrustedChannel,
    manifest_uri: Option<String>,
    executable_uri: Option<String>,
    executable_image: Option<&[u8]>,
) -> BootResult<ResolvedImages> {
    let mut executable_uri = executable_uri;

    let manifest_uri = match manifest_uri {
        Some(uri) => uri,
        None => {
            let Some(exec_uri) = executable_uri.as_deref() else {
                return Err(BootError::MissingEntryInput);
            };
            derive_manifest_uri(channel, exec_uri)?
        }
    };

    if executable_uri.is_none() {
        executable_uri = derive_executable_uri(channel, &manifest_uri)?;
    }

    if let Some(exec_uri) = executable_uri.as_deref() {
        verify_executable(channel, exec_uri, executable_image)?;
    }

    Ok(ResolvedImages {
        manifest_uri,
        executable_uri,
    })
}

/// Try `<normalized executable>.manifest`, then the fixed default manifest
/// in the base namespace.
fn derive_manifest_uri(channel: &dyn TrustedChannel, exec_uri: &str) -> BootResult<String> {
    let mut candidate = uri::normalize(exec_uri)?;
    candidate.push_str(MANIFEST_SUFFIX);
    if channel.probe(&candidate).is_ok() {
        return Ok(candidate);
    }
    if channel.probe(DEFAULT_MANIFEST_URI).is_ok() {
        return Ok(DEFAULT_MANIFEST_URI.to_string());
    }
    Err(BootError::ManifestNotFound {
        exec_uri: exec_uri.to_string(),
    })
}

/// Strip a recognized manifest suffix to name the executable. A matched
/// suffix means the executable must open; no match means no executable.
fn derive_executable_uri(
    channel: &dyn TrustedChannel,
    manifest_uri: &str,
) -> BootResult<Option<String>> {
    let stripped = manifest_uri
        .strip_suffix(MANIFEST_SUFFIX)
        .or_else(|| manifest_uri.strip_suffix(MANIFEST_SUFFIX_PLATFORM));
    let Some(exec_uri) = stripped else {
        return Ok(None);
    };
    channel
        .probe(exec_uri)
        .map_err(|source| BootError::stream(exec_uri, source))?;
    Ok(Some(exec_uri.to_string()))
}

/// Verify the binary-object magic from the pre-loaded image when one was
/// handed in, otherwise from the opened resource.
fn verify_executable(
    channel: &dyn TrustedChannel,
    exec_uri: &str,
    image: Option<&[u8]>,
) -> BootResult<()> {
    let recognized = match image {
        Some(image) => elf::has_elf_magic(image),
        None => elf::is_elf_object(channel, exec_uri)?,
    };
    if recognized {
        Ok(())
    } else {
        Err(BootError::NotAnExecutable {
            uri: exec_uri.to_string(),
        })
    }
}

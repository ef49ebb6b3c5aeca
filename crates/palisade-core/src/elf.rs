//! Binary-object magic recognition.
//!
//! Full ELF parsing, relocation, and mapping belong to the runtime's object
//! loader; the bootstrap stage only needs to recognize whether a resource is
//! an ELF object at all before handing it off.

use crate::error::{BootError, BootResult};
use crate::host::TrustedChannel;

/// ELF magic bytes: "\x7fELF"
pub const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];

/// Size of the ELF identification array.
pub const EI_NIDENT: usize = 16;

/// True when `prefix` begins with the ELF magic.
pub fn has_elf_magic(prefix: &[u8]) -> bool {
    prefix.len() >= ELF_MAGIC.len() && prefix[..ELF_MAGIC.len()] == ELF_MAGIC
}

/// Check the resource at `uri` for the ELF magic by reading its leading
/// identification bytes.
pub fn is_elf_object(channel: &dyn TrustedChannel, uri: &str) -> BootResult<bool> {
    let prefix = channel
        .read_prefix(uri, EI_NIDENT)
        .map_err(|source| BootError::stream(uri, source))?;
    Ok(has_elf_magic(&prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemChannel;

    #[test]
    fn magic_recognition() {
        assert!(has_elf_magic(b"\x7fELF\x02\x01\x01\x00"));
        assert!(!has_elf_magic(b"#!/bin/sh\n"));
        assert!(!has_elf_magic(b"\x7fEL"));
        assert!(!has_elf_magic(b""));
    }

    #[test]
    fn object_check_reads_prefix_only() {
        let mut channel = MemChannel::new();
        channel.insert("file:app", b"\x7fELF\x02\x01\x01\x00rest-of-binary".to_vec());
        assert!(is_elf_object(&channel, "file:app").unwrap());

        channel.insert("file:script", b"#!stub".to_vec());
        assert!(!is_elf_object(&channel, "file:script").unwrap());
    }

    #[test]
    fn object_check_propagates_stream_errors() {
        let channel = MemChannel::new();
        assert!(matches!(
            is_elf_object(&channel, "file:absent"),
            Err(BootError::Stream { .. })
        ));
    }
}

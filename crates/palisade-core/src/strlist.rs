//! NUL-delimited string lists read over the trusted channel.
//!
//! The on-wire format is a concatenation of NUL-terminated tokens; a
//! nonempty resource must end with NUL, a zero-length resource denotes an
//! empty list. The loaded list is one owned byte buffer plus validated
//! `(offset, len)` spans computed once at load time — tokens are
//! bounds-checked string views over that buffer, never copies.

use crate::error::{BootError, BootResult};
use crate::host::TrustedChannel;

/// An ordered list of tokens backed by a single owned buffer.
#[derive(Debug, Clone)]
pub struct StringList {
    buf: Vec<u8>,
    spans: Vec<(usize, usize)>,
}

impl StringList {
    /// Validate and index a raw NUL-delimited buffer.
    ///
    /// `uri` only labels errors; no I/O happens here.
    pub fn parse(uri: &str, buf: Vec<u8>) -> BootResult<Self> {
        if buf.is_empty() {
            return Ok(Self {
                buf,
                spans: Vec::new(),
            });
        }
        if buf.last() != Some(&0) {
            return Err(BootError::invalid_format(
                uri,
                "string list does not end with a NUL terminator",
            ));
        }

        let mut spans = Vec::new();
        let mut start = 0;
        for (i, &byte) in buf.iter().enumerate() {
            if byte == 0 {
                if std::str::from_utf8(&buf[start..i]).is_err() {
                    return Err(BootError::invalid_format(
                        uri,
                        "string list entry is not valid UTF-8",
                    ));
                }
                spans.push((start, i));
                start = i + 1;
            }
        }
        Ok(Self { buf, spans })
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// True when the list holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Bounds-checked view of the token at `idx`.
    pub fn get(&self, idx: usize) -> Option<&str> {
        let &(start, end) = self.spans.get(idx)?;
        std::str::from_utf8(&self.buf[start..end]).ok()
    }

    /// Iterate tokens in source order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        // Spans were UTF-8 validated in `parse`.
        self.spans
            .iter()
            .map(|&(start, end)| std::str::from_utf8(&self.buf[start..end]).unwrap_or(""))
    }

    /// Copy the tokens out as owned strings.
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }
}

/// Read the resource at `uri` in full and parse it as a [`StringList`].
///
/// Read failures propagate with the originating error kind; format failures
/// return no tokens.
pub fn load_string_list(channel: &dyn TrustedChannel, uri: &str) -> BootResult<StringList> {
    let buf = channel
        .read_all(uri)
        .map_err(|source| BootError::stream(uri, source))?;
    StringList::parse(uri, buf)
}

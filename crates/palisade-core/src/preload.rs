//! Preload library list parsing and loading.
//!
//! The manifest declares preload libraries as one comma-separated URI
//! string. Order is load order and is observable — library initialization
//! side effects may depend on it.

use crate::error::{BootError, BootResult};
use crate::host::ObjectLoader;

/// Split a comma-separated URI list into ordered, non-empty, trimmed
/// segments. Adjacent, leading, and trailing commas produce no entries.
pub fn parse_preload_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Load every library named in `raw` in list order.
///
/// An absent value is a no-op. The first load failure aborts the whole
/// bootstrap; libraries already loaded stay loaded (no rollback — the
/// process terminates anyway).
pub fn load_preload_libraries(raw: Option<&str>, loader: &mut dyn ObjectLoader) -> BootResult<()> {
    let Some(raw) = raw else {
        return Ok(());
    };
    for uri in parse_preload_list(raw) {
        loader
            .load_preload(uri)
            .map_err(|source| BootError::stream(uri, source))?;
    }
    Ok(())
}

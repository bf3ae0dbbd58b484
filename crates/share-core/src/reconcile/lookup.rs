//! Live name resolution before a batched edit

use share_exec::SharingBackend;
use share_listing::parse_listing;
use tracing::debug;

use crate::{Error, Result};

/// Look up the name `path` is registered under right now.
///
/// This always queries the tool; a name cached from discovery may be stale
/// once an earlier operation renamed the share.
///
/// # Errors
///
/// Returns [`Error::ShareVanished`] when the listing has no share for `path`.
pub fn resolve_live_name<B: SharingBackend + ?Sized>(backend: &B, path: &str) -> Result<String> {
    let listing = parse_listing(&backend.list()?)?;
    let record = listing.get(path).ok_or_else(|| Error::ShareVanished {
        path: path.to_string(),
    })?;
    debug!(path, share_name = %record.share_name, "Resolved live share name");
    Ok(record.share_name.clone())
}

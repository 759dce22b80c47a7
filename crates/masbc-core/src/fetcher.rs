//! Download a located run's `vr` and `br` maps into the cache.

use crate::cache::BoundaryCache;
use crate::error::BoundaryError;
use crate::field::Quantity;
use crate::rotation::RotationIndex;
use crate::source::remote_file_url;
use crate::transfer::Transfer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Both files were downloaded.
    Downloaded,
    /// Both files were cached and no overwrite was requested.
    AlreadyPresent,
}

/// Fetches `vr` then `br` from `url_prefix` unless both are cached and
/// `force_overwrite` is false. The first failure aborts the call.
pub fn fetch<T: Transfer + ?Sized>(
    transfer: &T,
    cache: &BoundaryCache,
    rotation: RotationIndex,
    url_prefix: &str,
    force_overwrite: bool,
) -> Result<FetchOutcome, BoundaryError> {
    if !force_overwrite && cache.is_complete(rotation) {
        tracing::info!(cr = rotation.get(), "files already exist");
        return Ok(FetchOutcome::AlreadyPresent);
    }

    cache.ensure_dir()?;
    tracing::info!(cr = rotation.get(), prefix = url_prefix, "downloading boundary files");
    for quantity in Quantity::ALL {
        let url = remote_file_url(url_prefix, quantity);
        let dest = cache.path_for(rotation, quantity);
        let bytes = transfer.download(&url, &dest)?;
        tracing::info!(%url, dest = %dest.display(), bytes, "downloaded");
    }
    Ok(FetchOutcome::Downloaded)
}

//! Local boundary-condition cache.
//!
//! One directory, two files per rotation:
//! `HelioMAS_CR<rotation>_vr_r0.hdf` and `HelioMAS_CR<rotation>_br_r0.hdf`.
//! Presence of a file under its final name means it was fully downloaded.

use crate::error::BoundaryError;
use crate::field::Quantity;
use crate::rotation::RotationIndex;
use crate::source::FILE_SUFFIX;
use crate::storage::TEMP_SUFFIX;
use std::fs;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "HelioMAS_CR";

/// File name of a cached boundary file, e.g. `HelioMAS_CR2054_vr_r0.hdf`.
pub fn cache_file_name(rotation: RotationIndex, quantity: Quantity) -> String {
    format!("{}{}_{}{}", FILE_PREFIX, rotation, quantity.tag(), FILE_SUFFIX)
}

/// Inverse of [`cache_file_name`].
pub fn parse_cache_file_name(name: &str) -> Option<(RotationIndex, Quantity)> {
    let rest = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    let (cr, tag) = rest.split_once('_')?;
    if cr.is_empty() || !cr.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let rotation = cr.parse::<RotationIndex>().ok()?;
    let quantity = Quantity::from_tag(tag)?;
    Some((rotation, quantity))
}

/// One cached file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub rotation: RotationIndex,
    pub quantity: Quantity,
    pub path: PathBuf,
    pub size: u64,
}

/// The boundary-condition directory. Passed in explicitly; never read
/// from process-global state.
#[derive(Debug, Clone)]
pub struct BoundaryCache {
    dir: PathBuf,
}

impl BoundaryCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if needed.
    pub fn ensure_dir(&self) -> Result<(), BoundaryError> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn path_for(&self, rotation: RotationIndex, quantity: Quantity) -> PathBuf {
        self.dir.join(cache_file_name(rotation, quantity))
    }

    pub fn contains(&self, rotation: RotationIndex, quantity: Quantity) -> bool {
        self.path_for(rotation, quantity).is_file()
    }

    /// True when both `vr` and `br` are cached for `rotation`.
    pub fn is_complete(&self, rotation: RotationIndex) -> bool {
        Quantity::ALL.iter().all(|&q| self.contains(rotation, q))
    }

    /// Every well-named cache file, sorted by rotation then quantity tag.
    /// Temp files and unrelated names are skipped. A missing directory is empty.
    pub fn entries(&self) -> Result<Vec<CacheEntry>, BoundaryError> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for item in read_dir {
            let item = item?;
            let name = item.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.ends_with(TEMP_SUFFIX) {
                continue;
            }
            let Some((rotation, quantity)) = parse_cache_file_name(name) else {
                continue;
            };
            let meta = item.metadata()?;
            if !meta.is_file() {
                continue;
            }
            entries.push(CacheEntry {
                rotation,
                quantity,
                path: item.path(),
                size: meta.len(),
            });
        }
        entries.sort_by(|a, b| {
            a.rotation
                .cmp(&b.rotation)
                .then_with(|| a.quantity.tag().cmp(b.quantity.tag()))
        });
        Ok(entries)
    }
}

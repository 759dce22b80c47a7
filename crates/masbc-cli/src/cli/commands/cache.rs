//! `masbc cache`: list cached boundary files.

use anyhow::Result;
use masbc_core::cache::BoundaryCache;
use masbc_core::checksum;
use masbc_core::config::MasbcConfig;

pub fn run_cache(cfg: &MasbcConfig, with_checksum: bool) -> Result<()> {
    let cache = BoundaryCache::new(cfg.resolve_boundary_dir()?);
    let entries = cache.entries()?;
    if entries.is_empty() {
        println!("No boundary files in {}.", cache.dir().display());
        return Ok(());
    }

    println!("{:<8} {:<4} {:>12} {}", "CR", "QTY", "SIZE", "FILE");
    for e in entries {
        let name = e
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("{:<8} {:<4} {:>12} {}", e.rotation, e.quantity, e.size, name);
        if with_checksum {
            println!("    sha256 {}", checksum::sha256_path(&e.path)?);
        }
    }
    Ok(())
}

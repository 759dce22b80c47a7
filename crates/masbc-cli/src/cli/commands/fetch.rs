//! `masbc fetch <CR>`: make both boundary maps available in the cache.

use super::{acquisition_notice, downloading_notice};
use anyhow::Result;
use masbc_core::config::MasbcConfig;
use masbc_core::pipeline::{Acquired, Pipeline};
use masbc_core::rotation::RotationIndex;
use masbc_core::source::SourcePreference;

pub fn run_fetch(cfg: &MasbcConfig, cr: RotationIndex, pref: &SourcePreference) -> Result<()> {
    let pipeline = Pipeline::from_config(cfg)?;
    let outcome = pipeline.acquire_with(cr, pref, |run| println!("{}", downloading_notice(run)))?;
    if let Acquired::Downloaded(run) = &outcome {
        println!("Saved CR{} ({}) to {}", cr, run.candidate, pipeline.cache().dir().display());
    }
    if let Some(notice) = acquisition_notice(cr, &outcome) {
        println!("{}", notice);
    }
    Ok(())
}

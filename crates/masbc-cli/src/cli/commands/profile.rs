//! `masbc profile <CR>`: equatorial boundary profiles as model-input JSON.

use super::{acquisition_notice, downloading_notice};
use anyhow::{Context, Result};
use masbc_core::config::MasbcConfig;
use masbc_core::error::BoundaryError;
use masbc_core::pipeline::{Acquired, Pipeline};
use masbc_core::rotation::RotationIndex;
use masbc_core::source::SourcePreference;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn run_profile(
    cfg: &MasbcConfig,
    cr: RotationIndex,
    pref: &SourcePreference,
    output: Option<&Path>,
) -> Result<()> {
    let pipeline = Pipeline::from_config(cfg)?;
    if !pipeline.can_read() {
        return Err(BoundaryError::ReaderUnavailable.into());
    }

    // Notices go to stderr; stdout carries only the JSON.
    let outcome = pipeline.acquire_with(cr, pref, |run| eprintln!("{}", downloading_notice(run)))?;
    if let Some(notice) = acquisition_notice(cr, &outcome) {
        eprintln!("{}", notice);
    }
    let source = match outcome {
        Acquired::NotFound => return Ok(()),
        Acquired::Downloaded(run) => Some(run.candidate),
        Acquired::AlreadyPresent => None,
    };

    let bc = pipeline.profile_from_cache(cr, source)?;
    let input = bc.to_model_input(pipeline.run());

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut w = BufWriter::new(file);
            input.write_json(&mut w)?;
            w.write_all(b"\n")?;
            w.flush()?;
            tracing::info!(cr = cr.get(), path = %path.display(), "wrote model input");
        }
        None => {
            let stdout = io::stdout();
            let mut w = stdout.lock();
            input.write_json(&mut w)?;
            w.write_all(b"\n")?;
        }
    }
    Ok(())
}

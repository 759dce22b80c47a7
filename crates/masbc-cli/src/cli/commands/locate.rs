//! `masbc locate <CR>`: report the run that would be downloaded.

use super::NOT_FOUND_NOTICE;
use anyhow::Result;
use masbc_core::config::MasbcConfig;
use masbc_core::locator::Located;
use masbc_core::pipeline::Pipeline;
use masbc_core::rotation::RotationIndex;
use masbc_core::source::SourcePreference;

pub fn run_locate(cfg: &MasbcConfig, cr: RotationIndex, pref: &SourcePreference) -> Result<()> {
    let pipeline = Pipeline::from_config(cfg)?;
    match pipeline.locate(cr, pref) {
        Located::Found(run) => {
            println!("CR{}: {}", cr, run.candidate);
            println!("  {}", run.url_prefix);
            if let Some(len) = run.content_length {
                println!("  br size: {} bytes", len);
            }
        }
        Located::NotFound => println!("{}", NOT_FOUND_NOTICE),
    }
    Ok(())
}

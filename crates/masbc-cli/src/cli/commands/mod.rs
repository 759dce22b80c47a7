//! CLI command handlers, one per file.

mod cache;
mod completions;
mod fetch;
mod locate;
mod profile;

pub use cache::run_cache;
pub use completions::run_completions;
pub use fetch::run_fetch;
pub use locate::run_locate;
pub use profile::run_profile;

use masbc_core::locator::LocatedRun;
use masbc_core::pipeline::Acquired;
use masbc_core::rotation::RotationIndex;

/// Printed when no candidate run exists for the rotation.
pub(crate) const NOT_FOUND_NOTICE: &str = "No data available for given CR and observatory preferences";

/// Printed once a run is chosen, before its files are requested.
pub(crate) fn downloading_notice(run: &LocatedRun) -> String {
    format!("Downloading from: {}", run.url_prefix)
}

/// Notice for an acquisition that downloaded nothing. Downloads get their
/// own per-command summary.
pub(crate) fn acquisition_notice(cr: RotationIndex, outcome: &Acquired) -> Option<String> {
    match outcome {
        Acquired::Downloaded(_) => None,
        Acquired::AlreadyPresent => Some(format!("Files already exist for CR{}", cr)),
        Acquired::NotFound => Some(NOT_FOUND_NOTICE.to_string()),
    }
}

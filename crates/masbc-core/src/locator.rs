//! Find the preferred MAS run that exists on the archive.

use crate::field::Quantity;
use crate::probe::Prober;
use crate::rotation::RotationIndex;
use crate::source::{remote_file_url, RemoteLayout, RunCandidate, SourcePreference};

/// A run whose `br` map answered the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedRun {
    pub candidate: RunCandidate,
    /// Helio directory URL, ending in `/`.
    pub url_prefix: String,
    /// Size of the probed `br` file, when the server reported it.
    pub content_length: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    Found(LocatedRun),
    NotFound,
}

/// Probes candidates in preference order and returns the first whose `br`
/// file exists (status < 400). Probe errors count as "absent"; nothing is
/// retried.
pub fn locate<P: Prober + ?Sized>(
    prober: &P,
    layout: &RemoteLayout,
    rotation: RotationIndex,
    preference: &SourcePreference,
) -> Located {
    for candidate in preference.candidates() {
        let url_prefix = layout.run_prefix(rotation, &candidate);
        let url = remote_file_url(&url_prefix, Quantity::RadialField);
        match prober.head(&url) {
            Ok(resp) if resp.exists() => {
                tracing::info!(
                    cr = rotation.get(),
                    run = %candidate,
                    status = resp.status,
                    "found MAS run"
                );
                return Located::Found(LocatedRun {
                    candidate,
                    url_prefix,
                    content_length: resp.content_length,
                });
            }
            Ok(resp) => {
                tracing::debug!(%url, status = resp.status, "candidate not available");
            }
            Err(e) => {
                tracing::debug!(%url, "probe failed: {:#}", e);
            }
        }
    }
    tracing::info!(cr = rotation.get(), "no MAS run matches the preferences");
    Located::NotFound
}

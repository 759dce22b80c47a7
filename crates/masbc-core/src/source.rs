//! MAS run catalogue: candidate ordering and remote path layout.
//!
//! Runs live under
//! `<base>/cr<rotation>-medium/<obs>_<runtype>_mas_std_<runnumber>/helio/`.

use crate::error::BoundaryError;
use crate::field::Quantity;
use crate::rotation::RotationIndex;
use std::fmt;
use url::Url;

/// Default Predictive Science run archive.
pub const DEFAULT_BASE_URL: &str = "http://www.predsci.com/data/runs";

/// Observatories in order of preference.
pub const OBSERVATORIES: [&str; 7] = ["hmi", "mdi", "solis", "gong", "mwo", "wso", "kpo"];
/// MAS run types in order of preference.
pub const RUN_TYPES: [&str; 3] = ["mas", "mast", "masp"];
/// MAS run numbers in order of preference.
pub const RUN_NUMBERS: [&str; 2] = ["0101", "0201"];

/// Suffix shared by remote and cached boundary files.
pub const FILE_SUFFIX: &str = "_r0.hdf";

/// Optional caller preferences. `None` means "walk the default order".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcePreference {
    pub observatory: Option<String>,
    pub run_type: Option<String>,
    pub run_number: Option<String>,
}

impl SourcePreference {
    /// Builds a preference, treating empty tokens as unspecified and
    /// rejecting tokens that cannot be a single path segment.
    pub fn new(
        observatory: Option<String>,
        run_type: Option<String>,
        run_number: Option<String>,
    ) -> Result<Self, BoundaryError> {
        Ok(Self {
            observatory: normalize("observatory", observatory)?,
            run_type: normalize("run type", run_type)?,
            run_number: normalize("run number", run_number)?,
        })
    }

    /// True when any dimension is pinned. Pinned preferences force a re-fetch.
    pub fn is_override(&self) -> bool {
        self.observatory.is_some() || self.run_type.is_some() || self.run_number.is_some()
    }

    /// Every candidate in probe order: observatory outer, run type middle,
    /// run number inner.
    pub fn candidates(&self) -> Vec<RunCandidate> {
        let observatories = choices(&self.observatory, &OBSERVATORIES);
        let run_types = choices(&self.run_type, &RUN_TYPES);
        let run_numbers = choices(&self.run_number, &RUN_NUMBERS);
        let run_numbers = &run_numbers;

        observatories
            .iter()
            .flat_map(|obs| {
                run_types.iter().flat_map(move |rt| {
                    run_numbers.iter().map(move |rn| RunCandidate {
                        observatory: obs.clone(),
                        run_type: rt.clone(),
                        run_number: rn.clone(),
                    })
                })
            })
            .collect()
    }
}

fn choices(pinned: &Option<String>, defaults: &[&str]) -> Vec<String> {
    match pinned {
        Some(v) => vec![v.clone()],
        None => defaults.iter().map(|s| s.to_string()).collect(),
    }
}

fn normalize(what: &str, token: Option<String>) -> Result<Option<String>, BoundaryError> {
    let Some(raw) = token else {
        return Ok(None);
    };
    let t = raw.trim();
    if t.is_empty() {
        return Ok(None);
    }
    if t.contains(['/', '\\', '?', '#']) || t.chars().any(char::is_whitespace) || t == ".." {
        return Err(BoundaryError::InvalidInput(format!("invalid {what}: {raw:?}")));
    }
    Ok(Some(t.to_ascii_lowercase()))
}

/// One concrete (observatory, run type, run number) combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCandidate {
    pub observatory: String,
    pub run_type: String,
    pub run_number: String,
}

impl RunCandidate {
    pub fn new(observatory: &str, run_type: &str, run_number: &str) -> Self {
        Self {
            observatory: observatory.to_string(),
            run_type: run_type.to_string(),
            run_number: run_number.to_string(),
        }
    }

    /// Remote run directory, e.g. `hmi_mas_mas_std_0101`.
    pub fn run_directory(&self) -> String {
        format!(
            "{}_{}_mas_std_{}",
            self.observatory, self.run_type, self.run_number
        )
    }
}

impl fmt::Display for RunCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.run_directory())
    }
}

/// Base URL of the run archive plus the path template below it.
#[derive(Debug, Clone)]
pub struct RemoteLayout {
    base: Url,
}

impl RemoteLayout {
    pub fn new(base_url: &str) -> Result<Self, BoundaryError> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| BoundaryError::InvalidInput(format!("base URL {base_url:?}: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(BoundaryError::InvalidInput(format!(
                "base URL must be http or https: {base_url}"
            )));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    /// URL prefix of a run's helio directory, ending in `/`.
    pub fn run_prefix(&self, rotation: RotationIndex, candidate: &RunCandidate) -> String {
        format!(
            "{}/cr{}-medium/{}/helio/",
            self.base.as_str().trim_end_matches('/'),
            rotation,
            candidate.run_directory()
        )
    }
}

/// Remote file URL for a quantity below a run prefix, e.g. `<prefix>br_r0.hdf`.
pub fn remote_file_url(prefix: &str, quantity: Quantity) -> String {
    format!("{}{}{}", prefix, quantity.tag(), FILE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_has_42_candidates_in_nested_order() {
        let all = SourcePreference::default().candidates();
        assert_eq!(all.len(), 42);
        assert_eq!(all[0], RunCandidate::new("hmi", "mas", "0101"));
        assert_eq!(all[1], RunCandidate::new("hmi", "mas", "0201"));
        assert_eq!(all[2], RunCandidate::new("hmi", "mast", "0101"));
        assert_eq!(all[6], RunCandidate::new("mdi", "mas", "0101"));
        assert_eq!(all[41], RunCandidate::new("kpo", "masp", "0201"));
    }

    #[test]
    fn pinned_dimension_becomes_singleton() {
        let pref = SourcePreference::new(Some("mdi".into()), None, None).unwrap();
        assert!(pref.is_override());
        let all = pref.candidates();
        assert_eq!(all.len(), 6);
        assert!(all.iter().all(|c| c.observatory == "mdi"));

        let pref = SourcePreference::new(None, Some("mast".into()), Some("0201".into())).unwrap();
        let all = pref.candidates();
        assert_eq!(all.len(), 7);
        assert!(all.iter().all(|c| c.run_type == "mast" && c.run_number == "0201"));
    }

    #[test]
    fn empty_tokens_are_unspecified() {
        let pref = SourcePreference::new(Some("".into()), Some("  ".into()), None).unwrap();
        assert!(!pref.is_override());
        assert_eq!(pref.candidates().len(), 42);
    }

    #[test]
    fn rejects_tokens_that_escape_the_path() {
        assert!(SourcePreference::new(Some("../etc".into()), None, None).is_err());
        assert!(SourcePreference::new(None, Some("ma s".into()), None).is_err());
        assert!(SourcePreference::new(None, None, Some("01?01".into())).is_err());
    }

    #[test]
    fn run_prefix_matches_archive_layout() {
        let layout = RemoteLayout::new(DEFAULT_BASE_URL).unwrap();
        let cr = RotationIndex::new(2010).unwrap();
        let prefix = layout.run_prefix(cr, &RunCandidate::new("mdi", "mas", "0101"));
        assert_eq!(
            prefix,
            "http://www.predsci.com/data/runs/cr2010-medium/mdi_mas_mas_std_0101/helio/"
        );
        assert_eq!(
            remote_file_url(&prefix, Quantity::RadialField),
            "http://www.predsci.com/data/runs/cr2010-medium/mdi_mas_mas_std_0101/helio/br_r0.hdf"
        );
    }

    #[test]
    fn layout_tolerates_trailing_slash_and_rejects_other_schemes() {
        let layout = RemoteLayout::new("http://127.0.0.1:8080/runs/").unwrap();
        let cr = RotationIndex::new(2054).unwrap();
        assert_eq!(
            layout.run_prefix(cr, &RunCandidate::new("hmi", "mas", "0101")),
            "http://127.0.0.1:8080/runs/cr2054-medium/hmi_mas_mas_std_0101/helio/"
        );
        assert!(RemoteLayout::new("ftp://example.com/runs").is_err());
        assert!(RemoteLayout::new("not a url").is_err());
    }
}

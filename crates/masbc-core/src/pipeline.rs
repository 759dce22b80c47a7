//! Acquisition and profile pipeline for one Carrington rotation.
//!
//! `acquire` consults the cache, then the locator and fetcher.
//! `boundary_conditions` additionally reads both maps and resamples them
//! onto the model longitude grid. It refuses to start when the build has no
//! reader for the cached files.

use crate::cache::BoundaryCache;
use crate::config::MasbcConfig;
use crate::error::BoundaryError;
use crate::fetcher::{fetch, FetchOutcome};
use crate::field::{GriddedField, Quantity};
use crate::locator::{locate, Located, LocatedRun};
use crate::probe::{CurlProber, Prober};
use crate::profile::{BoundaryConditions, PolarityMode, RunMetadata};
use crate::reader::{default_reader, FieldReader};
use crate::resample::{longitude_grid, resample};
use crate::rotation::RotationIndex;
use crate::source::{RemoteLayout, RunCandidate, SourcePreference};
use crate::transfer::{CurlTransfer, Transfer};

/// Result of making a rotation's boundary files available locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquired {
    /// Files were downloaded from this run.
    Downloaded(LocatedRun),
    /// Both files were already cached; nothing was requested.
    AlreadyPresent,
    /// No candidate run exists on the archive. Nothing was downloaded.
    NotFound,
}

/// Both maps for one rotation, as read from the cache.
#[derive(Debug, Clone)]
pub struct BoundaryFields {
    pub vr: GriddedField,
    pub br: GriddedField,
}

pub struct Pipeline {
    layout: RemoteLayout,
    cache: BoundaryCache,
    prober: Box<dyn Prober>,
    transfer: Box<dyn Transfer>,
    reader: Box<dyn FieldReader>,
    nlong: usize,
    polarity: PolarityMode,
    run: RunMetadata,
}

impl Pipeline {
    /// Assembles a pipeline from explicit parts. `nlong`, polarity and run
    /// metadata start at their defaults; see the `with_*` setters.
    pub fn new(
        layout: RemoteLayout,
        cache: BoundaryCache,
        prober: Box<dyn Prober>,
        transfer: Box<dyn Transfer>,
        reader: Box<dyn FieldReader>,
    ) -> Self {
        let defaults = MasbcConfig::default();
        Self {
            layout,
            cache,
            prober,
            transfer,
            reader,
            nlong: defaults.nlong,
            polarity: defaults.polarity,
            run: defaults.run,
        }
    }

    /// curl-backed pipeline using the configured archive, cache and timeouts.
    pub fn from_config(cfg: &MasbcConfig) -> anyhow::Result<Self> {
        cfg.validate()?;
        let layout = RemoteLayout::new(&cfg.base_url)?;
        let cache = BoundaryCache::new(cfg.resolve_boundary_dir()?);
        Ok(Self::new(
            layout,
            cache,
            Box::new(CurlProber::new(cfg.timeouts)),
            Box::new(CurlTransfer::new(cfg.timeouts)),
            default_reader(),
        )
        .with_nlong(cfg.nlong)
        .with_polarity(cfg.polarity)
        .with_run(cfg.run))
    }

    pub fn with_nlong(mut self, nlong: usize) -> Self {
        self.nlong = nlong;
        self
    }

    pub fn with_polarity(mut self, polarity: PolarityMode) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn with_run(mut self, run: RunMetadata) -> Self {
        self.run = run;
        self
    }

    pub fn cache(&self) -> &BoundaryCache {
        &self.cache
    }

    pub fn layout(&self) -> &RemoteLayout {
        &self.layout
    }

    pub fn run(&self) -> RunMetadata {
        self.run
    }

    /// Whether cached maps can be decoded by this build.
    pub fn can_read(&self) -> bool {
        self.reader.is_available()
    }

    /// Probes the archive without touching the cache.
    pub fn locate(&self, rotation: RotationIndex, preference: &SourcePreference) -> Located {
        locate(self.prober.as_ref(), &self.layout, rotation, preference)
    }

    /// Ensures both files for `rotation` are cached.
    ///
    /// A complete cache and no preference override short-circuits without
    /// any network request. An override re-downloads even when cached.
    pub fn acquire(
        &self,
        rotation: RotationIndex,
        preference: &SourcePreference,
    ) -> Result<Acquired, BoundaryError> {
        self.acquire_with(rotation, preference, |_| {})
    }

    /// Like [`Pipeline::acquire`], calling `on_download` with the located run
    /// before the first byte is requested.
    pub fn acquire_with(
        &self,
        rotation: RotationIndex,
        preference: &SourcePreference,
        on_download: impl FnOnce(&LocatedRun),
    ) -> Result<Acquired, BoundaryError> {
        let force = preference.is_override();
        if !force && self.cache.is_complete(rotation) {
            tracing::info!(cr = rotation.get(), dir = %self.cache.dir().display(), "files already exist");
            return Ok(Acquired::AlreadyPresent);
        }

        let run = match self.locate(rotation, preference) {
            Located::Found(run) => run,
            Located::NotFound => return Ok(Acquired::NotFound),
        };
        on_download(&run);
        match fetch(
            self.transfer.as_ref(),
            &self.cache,
            rotation,
            &run.url_prefix,
            force,
        )? {
            FetchOutcome::Downloaded => Ok(Acquired::Downloaded(run)),
            FetchOutcome::AlreadyPresent => Ok(Acquired::AlreadyPresent),
        }
    }

    /// Reads both cached maps for `rotation`.
    pub fn read_fields(&self, rotation: RotationIndex) -> Result<BoundaryFields, BoundaryError> {
        let read = |q: Quantity| self.reader.read_field(&self.cache.path_for(rotation, q), q);
        Ok(BoundaryFields {
            vr: read(Quantity::RadialVelocity)?,
            br: read(Quantity::RadialField)?,
        })
    }

    /// Equatorial speed and polarity profiles on an `nlong`-bin grid.
    ///
    /// Returns `Ok(None)` when the files are not cached and no run exists
    /// on the archive. Without a usable reader this fails with
    /// `ReaderUnavailable` before any request.
    pub fn boundary_conditions(
        &self,
        rotation: RotationIndex,
        preference: &SourcePreference,
    ) -> Result<Option<BoundaryConditions>, BoundaryError> {
        if !self.can_read() {
            return Err(BoundaryError::ReaderUnavailable);
        }
        let source = match self.acquire(rotation, preference)? {
            Acquired::NotFound => return Ok(None),
            Acquired::Downloaded(run) => Some(run.candidate),
            Acquired::AlreadyPresent => None,
        };
        self.profile_from_cache(rotation, source).map(Some)
    }

    /// Reads and resamples the cached maps for `rotation`. `source` is the
    /// run the files were just downloaded from, if any.
    pub fn profile_from_cache(
        &self,
        rotation: RotationIndex,
        source: Option<RunCandidate>,
    ) -> Result<BoundaryConditions, BoundaryError> {
        let fields = self.read_fields(rotation)?;
        let longitudes = longitude_grid(self.nlong);
        let speed = resample(&fields.vr, &longitudes)?;
        let br = resample(&fields.br, &longitudes)?;

        let mut bc =
            BoundaryConditions::from_profiles(rotation, &longitudes, &speed, &br, self.polarity);
        bc.source = source;
        Ok(bc)
    }
}

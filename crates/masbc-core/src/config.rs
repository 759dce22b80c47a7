use crate::error::BoundaryError;
use crate::profile::{PolarityMode, RunMetadata};
use crate::resample::DEFAULT_NLONG;
use crate::source::{RemoteLayout, DEFAULT_BASE_URL};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Network timeouts (optional section in config.toml).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timeouts {
    /// Connect timeout in seconds for probes and downloads.
    pub connect_secs: u64,
    /// Whole-request timeout in seconds for a HEAD probe.
    pub probe_secs: u64,
    /// Whole-request timeout in seconds for one file download.
    pub download_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect_secs: 15,
            probe_secs: 30,
            download_secs: 3600,
        }
    }
}

impl Timeouts {
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    pub fn probe(&self) -> Duration {
        Duration::from_secs(self.probe_secs)
    }

    pub fn download(&self) -> Duration {
        Duration::from_secs(self.download_secs)
    }
}

/// Global configuration loaded from `~/.config/masbc/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasbcConfig {
    /// Root of the MAS run archive.
    pub base_url: String,
    /// Boundary-condition cache directory. Defaults to the XDG data dir.
    #[serde(default)]
    pub boundary_dir: Option<PathBuf>,
    /// Number of model longitude bins.
    pub nlong: usize,
    /// How the `br` profile is handed to the model: "raw" (default) or "sign".
    #[serde(default)]
    pub polarity: PolarityMode,
    #[serde(default)]
    pub timeouts: Timeouts,
    #[serde(default)]
    pub run: RunMetadata,
}

impl Default for MasbcConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            boundary_dir: None,
            nlong: DEFAULT_NLONG,
            polarity: PolarityMode::Raw,
            timeouts: Timeouts::default(),
            run: RunMetadata::default(),
        }
    }
}

impl MasbcConfig {
    /// Rejects values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), BoundaryError> {
        RemoteLayout::new(&self.base_url)?;
        if self.nlong == 0 {
            return Err(BoundaryError::Config("nlong must be at least 1".to_string()));
        }
        if self.timeouts.connect_secs == 0
            || self.timeouts.probe_secs == 0
            || self.timeouts.download_secs == 0
        {
            return Err(BoundaryError::Config(
                "timeouts must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    /// Cache directory: explicit setting, else `~/.local/share/masbc/boundary_conditions`.
    pub fn resolve_boundary_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.boundary_dir {
            return Ok(dir.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("masbc")?;
        Ok(xdg_dirs.get_data_home().join("boundary_conditions"))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("masbc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MasbcConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Like `load_or_init` for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<MasbcConfig> {
    if !path.exists() {
        let default_cfg = MasbcConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: MasbcConfig = toml::from_str(&data)
        .map_err(|e| BoundaryError::Config(format!("{}: {}", path.display(), e)))?;
    cfg.validate()?;
    Ok(cfg)
}

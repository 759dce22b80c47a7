//! CLI for preparing HUXt boundary conditions from MAS runs.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use masbc_core::config::{self, MasbcConfig};
use masbc_core::profile::PolarityMode;
use masbc_core::rotation::RotationIndex;
use masbc_core::source::SourcePreference;
use std::path::PathBuf;

use commands::{run_cache, run_completions, run_fetch, run_locate, run_profile};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "masbc")]
#[command(about = "masbc: MAS boundary conditions for the HUXt solar-wind model", long_about = None)]
pub struct Cli {
    /// Boundary-condition cache directory (overrides config).
    #[arg(long, global = true, value_name = "DIR")]
    pub boundary_dir: Option<PathBuf>,

    /// Root URL of the MAS run archive (overrides config).
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Observatory / run type / run number pins. Unset means "try all in order".
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Observatory, e.g. hmi, mdi, gong.
    #[arg(long)]
    pub observatory: Option<String>,

    /// Run type: mas, mast or masp.
    #[arg(long)]
    pub run_type: Option<String>,

    /// Run number, e.g. 0101.
    #[arg(long)]
    pub run_number: Option<String>,
}

impl SourceArgs {
    pub fn to_preference(&self) -> Result<SourcePreference> {
        Ok(SourcePreference::new(
            self.observatory.clone(),
            self.run_type.clone(),
            self.run_number.clone(),
        )?)
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Find the preferred MAS run for a rotation without downloading.
    Locate {
        /// Carrington rotation number.
        cr: RotationIndex,
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Download the vr and br boundary maps for a rotation into the cache.
    Fetch {
        /// Carrington rotation number.
        cr: RotationIndex,
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Produce the equatorial speed and polarity profiles as JSON.
    Profile {
        /// Carrington rotation number.
        cr: RotationIndex,
        #[command(flatten)]
        source: SourceArgs,
        /// Number of model longitude bins (overrides config).
        #[arg(long, value_name = "N")]
        nlong: Option<usize>,
        /// Polarity handed to the model: raw or sign (overrides config).
        #[arg(long)]
        polarity: Option<PolarityMode>,
        /// Write JSON here instead of stdout.
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List cached boundary files.
    Cache {
        /// Also print SHA-256 of each file.
        #[arg(long)]
        checksum: bool,
    },

    /// Print a shell completion script.
    Completions {
        shell: Shell,
    },
}

impl Cli {
    /// Config file values with this invocation's global overrides applied.
    fn effective_config(&self, mut cfg: MasbcConfig) -> Result<MasbcConfig> {
        if let Some(dir) = &self.boundary_dir {
            cfg.boundary_dir = Some(dir.clone());
        }
        if let Some(url) = &self.base_url {
            cfg.base_url = url.clone();
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = cli.effective_config(config::load_or_init()?)?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Locate { cr, source } => run_locate(&cfg, cr, &source.to_preference()?)?,
            CliCommand::Fetch { cr, source } => run_fetch(&cfg, cr, &source.to_preference()?)?,
            CliCommand::Profile {
                cr,
                source,
                nlong,
                polarity,
                output,
            } => {
                let mut cfg = cfg;
                if let Some(n) = nlong {
                    cfg.nlong = n;
                }
                if let Some(p) = polarity {
                    cfg.polarity = p;
                }
                cfg.validate()?;
                run_profile(&cfg, cr, &source.to_preference()?, output.as_deref())?;
            }
            CliCommand::Cache { checksum } => run_cache(&cfg, checksum)?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

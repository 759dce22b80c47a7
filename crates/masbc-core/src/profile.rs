//! Unit-tagged equatorial boundary conditions handed to the HUXt model.

use crate::rotation::RotationIndex;
use crate::source::RunCandidate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uom::si::angle::radian;
use uom::si::f64::{Angle, Ratio, Velocity};
use uom::si::ratio::ratio;
use uom::si::velocity::kilometer_per_second;

/// How the `br` profile is handed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolarityMode {
    /// Radial field in MAS model units.
    #[default]
    Raw,
    /// +1 where `br >= 0`, -1 elsewhere.
    Sign,
}

impl PolarityMode {
    pub fn apply(self, br: f64) -> f64 {
        match self {
            PolarityMode::Raw => br,
            PolarityMode::Sign => {
                if br >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

impl fmt::Display for PolarityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolarityMode::Raw => f.write_str("raw"),
            PolarityMode::Sign => f.write_str("sign"),
        }
    }
}

impl FromStr for PolarityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(PolarityMode::Raw),
            "sign" => Ok(PolarityMode::Sign),
            other => Err(format!("unknown polarity mode {other:?} (expected raw or sign)")),
        }
    }
}

/// Run metadata forwarded to the model alongside the profiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Simulated duration in days.
    pub simtime_days: f64,
    /// Model time-step scaling.
    pub dt_scale: u32,
}

impl Default for RunMetadata {
    fn default() -> Self {
        Self {
            simtime_days: 5.0,
            dt_scale: 4,
        }
    }
}

/// Speed and polarity profiles on the model longitude grid.
#[derive(Debug, Clone)]
pub struct BoundaryConditions {
    pub rotation: RotationIndex,
    pub longitudes: Vec<Angle>,
    pub speed: Vec<Velocity>,
    pub polarity: Vec<Ratio>,
    pub polarity_mode: PolarityMode,
    /// Run the files came from, when this process located it.
    pub source: Option<RunCandidate>,
}

impl BoundaryConditions {
    /// Wraps bare profiles (radians, km/s, MAS units) in their units.
    ///
    /// All three slices must share the same length.
    pub fn from_profiles(
        rotation: RotationIndex,
        longitudes_rad: &[f64],
        speed_km_s: &[f64],
        br: &[f64],
        polarity_mode: PolarityMode,
    ) -> Self {
        debug_assert_eq!(longitudes_rad.len(), speed_km_s.len());
        debug_assert_eq!(longitudes_rad.len(), br.len());
        Self {
            rotation,
            longitudes: longitudes_rad.iter().map(|&l| Angle::new::<radian>(l)).collect(),
            speed: speed_km_s
                .iter()
                .map(|&v| Velocity::new::<kilometer_per_second>(v))
                .collect(),
            polarity: br
                .iter()
                .map(|&b| Ratio::new::<ratio>(polarity_mode.apply(b)))
                .collect(),
            polarity_mode,
            source: None,
        }
    }

    pub fn nlong(&self) -> usize {
        self.longitudes.len()
    }

    /// Flattens into the JSON document read by the model runner.
    pub fn to_model_input(&self, run: RunMetadata) -> ModelInput {
        ModelInput {
            rotation: self.rotation.get(),
            nlong: self.nlong(),
            longitudes_rad: self.longitudes.iter().map(|a| a.get::<radian>()).collect(),
            speed_km_s: self
                .speed
                .iter()
                .map(|v| v.get::<kilometer_per_second>())
                .collect(),
            polarity: self.polarity.iter().map(|r| r.get::<ratio>()).collect(),
            polarity_mode: self.polarity_mode,
            run,
            source: self.source.as_ref().map(RunCandidate::run_directory),
        }
    }
}

/// Serialized model input: explicit unit suffixes, no unit library types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInput {
    pub rotation: u32,
    pub nlong: usize,
    pub longitudes_rad: Vec<f64>,
    pub speed_km_s: Vec<f64>,
    pub polarity: Vec<f64>,
    pub polarity_mode: PolarityMode,
    pub run: RunMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ModelInput {
    /// Pretty JSON, as read by the model runner.
    pub fn write_json<W: std::io::Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, self)
    }
}

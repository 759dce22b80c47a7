//! Gridded MAS fields on the outer helio boundary (30 solar radii).

use crate::error::BoundaryError;
use ndarray::Array2;
use std::fmt;
use std::path::Path;

/// MAS velocity unit in km/s.
pub const MAS_VELOCITY_UNIT_KM_S: f64 = 481.0;

/// The two boundary quantities HUXt consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Radial solar-wind speed, `vr`.
    RadialVelocity,
    /// Radial magnetic field, `br` (polarity proxy).
    RadialField,
}

impl Quantity {
    /// Both quantities in download order.
    pub const ALL: [Quantity; 2] = [Quantity::RadialVelocity, Quantity::RadialField];

    /// Tag used in remote and local file names.
    pub fn tag(self) -> &'static str {
        match self {
            Quantity::RadialVelocity => "vr",
            Quantity::RadialField => "br",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "vr" => Some(Quantity::RadialVelocity),
            "br" => Some(Quantity::RadialField),
            _ => None,
        }
    }

    /// Factor from stored MAS units to physical units.
    pub fn scale(self) -> f64 {
        match self {
            Quantity::RadialVelocity => MAS_VELOCITY_UNIT_KM_S,
            Quantity::RadialField => 1.0,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Quantity::RadialVelocity => "km/s",
            Quantity::RadialField => "MAS units",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

/// A 2-D field indexed `(longitude, colatitude)` with its axes in radians.
///
/// Values are in physical units (see [`Quantity::unit`]).
#[derive(Debug, Clone)]
pub struct GriddedField {
    quantity: Quantity,
    values: Array2<f64>,
    longitude: Vec<f64>,
    colatitude: Vec<f64>,
}

impl GriddedField {
    /// Builds a field from values already in physical units.
    ///
    /// Fails when the value grid does not have one row per longitude and
    /// one column per colatitude, since rows are addressed by axis index.
    pub fn new(
        quantity: Quantity,
        values: Array2<f64>,
        longitude: Vec<f64>,
        colatitude: Vec<f64>,
        path: &Path,
    ) -> Result<Self, BoundaryError> {
        let expected = (longitude.len(), colatitude.len());
        if values.dim() != expected {
            return Err(BoundaryError::parse(
                path,
                format!(
                    "{} grid has shape {:?}, axes imply {:?}",
                    quantity,
                    values.dim(),
                    expected
                ),
            ));
        }
        Ok(Self {
            quantity,
            values,
            longitude,
            colatitude,
        })
    }

    /// Builds a field from raw MAS model units, applying [`Quantity::scale`].
    pub fn from_model_units(
        quantity: Quantity,
        raw: Array2<f64>,
        longitude: Vec<f64>,
        colatitude: Vec<f64>,
        path: &Path,
    ) -> Result<Self, BoundaryError> {
        let scale = quantity.scale();
        Self::new(quantity, raw * scale, longitude, colatitude, path)
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Carrington longitude of each row, in radians.
    pub fn longitude(&self) -> &[f64] {
        &self.longitude
    }

    /// Angle down from the north pole of each column, in radians.
    pub fn colatitude(&self) -> &[f64] {
        &self.colatitude
    }
}

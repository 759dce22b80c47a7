//! Carrington rotation index.

use crate::error::BoundaryError;
use std::fmt;
use std::str::FromStr;

/// A Carrington rotation number (~27.3 day period). Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RotationIndex(u32);

impl RotationIndex {
    pub fn new(value: u32) -> Result<Self, BoundaryError> {
        if value == 0 {
            return Err(BoundaryError::InvalidInput(
                "rotation index must be positive".to_string(),
            ));
        }
        Ok(RotationIndex(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RotationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<i64> for RotationIndex {
    type Error = BoundaryError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let v = u32::try_from(value).map_err(|_| {
            BoundaryError::InvalidInput(format!("rotation index out of range: {value}"))
        })?;
        RotationIndex::new(v)
    }
}

/// Accepts whole, finite, positive numbers only; NaN stands for "missing".
impl TryFrom<f64> for RotationIndex {
    type Error = BoundaryError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_nan() {
            return Err(BoundaryError::InvalidInput(
                "rotation index is missing".to_string(),
            ));
        }
        if !value.is_finite() || value.fract() != 0.0 || value > u32::MAX as f64 {
            return Err(BoundaryError::InvalidInput(format!(
                "rotation index must be a whole number: {value}"
            )));
        }
        if value <= 0.0 {
            return Err(BoundaryError::InvalidInput(
                "rotation index must be positive".to_string(),
            ));
        }
        RotationIndex::new(value as u32)
    }
}

impl FromStr for RotationIndex {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BoundaryError::InvalidInput(
                "rotation index is missing".to_string(),
            ));
        }
        let v: i64 = s
            .parse()
            .map_err(|_| BoundaryError::InvalidInput(format!("not a rotation index: {s:?}")))?;
        RotationIndex::try_from(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_integers() {
        assert_eq!(RotationIndex::new(2054).unwrap().get(), 2054);
        assert_eq!(RotationIndex::try_from(2010i64).unwrap().get(), 2010);
        assert_eq!(RotationIndex::try_from(2054.0f64).unwrap().get(), 2054);
        assert_eq!("2054".parse::<RotationIndex>().unwrap().get(), 2054);
    }

    #[test]
    fn rejects_nan_and_non_positive() {
        assert!(matches!(
            RotationIndex::try_from(f64::NAN),
            Err(BoundaryError::InvalidInput(_))
        ));
        assert!(RotationIndex::new(0).is_err());
        assert!(RotationIndex::try_from(-3i64).is_err());
        assert!(RotationIndex::try_from(-1.0f64).is_err());
        assert!(RotationIndex::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_fractional_and_garbage() {
        assert!(RotationIndex::try_from(2054.5f64).is_err());
        assert!("".parse::<RotationIndex>().is_err());
        assert!("cr2054".parse::<RotationIndex>().is_err());
    }

    #[test]
    fn display_is_plain_number() {
        assert_eq!(RotationIndex::new(2054).unwrap().to_string(), "2054");
    }
}

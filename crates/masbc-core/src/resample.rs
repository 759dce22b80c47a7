//! Reduce a 2-D boundary map to an equatorial profile on the model grid.

use crate::error::BoundaryError;
use crate::field::GriddedField;
use crate::interp::{interp, interp_many};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;

/// Colatitude of the solar equator.
pub const EQUATOR_COLATITUDE: f64 = FRAC_PI_2;

/// Default number of HUXt longitude bins.
pub const DEFAULT_NLONG: usize = 128;

/// Bin centers of an `nlong`-bin longitude grid over (0, 2π).
pub fn longitude_grid(nlong: usize) -> Vec<f64> {
    if nlong == 0 {
        return Vec::new();
    }
    let dphi = TAU / nlong as f64;
    (0..nlong).map(|i| (i as f64 + 0.5) * dphi).collect()
}

/// Value at the equator for every source longitude.
pub fn equatorial_slice(field: &GriddedField) -> Result<Vec<f64>, BoundaryError> {
    let colat = field.colatitude();
    field
        .values()
        .rows()
        .into_iter()
        .map(|row| {
            let row = row.to_vec();
            interp(EQUATOR_COLATITUDE, colat, &row).ok_or_else(|| empty_axis(field, "colatitude"))
        })
        .collect()
}

/// Equatorial profile of `field` regridded onto `target_longitudes` (radians).
///
/// The output has exactly `target_longitudes.len()` samples.
pub fn resample(field: &GriddedField, target_longitudes: &[f64]) -> Result<Vec<f64>, BoundaryError> {
    let eq = equatorial_slice(field)?;
    let out = interp_many(target_longitudes, field.longitude(), &eq)
        .ok_or_else(|| empty_axis(field, "longitude"))?;
    tracing::debug!(
        quantity = %field.quantity(),
        source_bins = eq.len(),
        target_bins = out.len(),
        "resampled equatorial profile"
    );
    Ok(out)
}

fn empty_axis(field: &GriddedField, axis: &str) -> BoundaryError {
    BoundaryError::parse(
        Path::new(field.quantity().tag()),
        format!("empty {axis} axis"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Quantity;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};
    use std::f64::consts::PI;

    fn field(values: Array2<f64>, lon: Vec<f64>, colat: Vec<f64>) -> GriddedField {
        GriddedField::new(Quantity::RadialField, values, lon, colat, Path::new("t")).unwrap()
    }

    #[test]
    fn grid_centers_are_offset_by_half_a_bin() {
        let g = longitude_grid(4);
        assert_eq!(g.len(), 4);
        assert_relative_eq!(g[0], PI / 4.0);
        assert_relative_eq!(g[3], 7.0 * PI / 4.0);
        assert_relative_eq!(longitude_grid(128)[0], TAU / 256.0);
        assert!(longitude_grid(0).is_empty());
    }

    #[test]
    fn slice_interpolates_at_the_equator() {
        // Two longitudes; colatitude samples straddle pi/2.
        let f = field(
            array![[0.0, 10.0], [100.0, 200.0]],
            vec![1.0, 2.0],
            vec![PI / 4.0, 3.0 * PI / 4.0],
        );
        let eq = equatorial_slice(&f).unwrap();
        assert_relative_eq!(eq[0], 5.0);
        assert_relative_eq!(eq[1], 150.0);
    }

    #[test]
    fn slice_clamps_when_equator_is_not_sampled() {
        let f = field(array![[3.0, 4.0]], vec![0.0], vec![0.1, 0.2]);
        assert_eq!(equatorial_slice(&f).unwrap(), vec![4.0]);
    }

    #[test]
    fn output_length_follows_target_grid() {
        let f = field(
            array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]],
            vec![0.5, 1.5, 2.5],
            vec![0.0, PI],
        );
        for n in [1, 7, 128, 512] {
            assert_eq!(resample(&f, &longitude_grid(n)).unwrap().len(), n);
        }
    }

    #[test]
    fn longitudes_outside_source_range_take_endpoint_values() {
        let f = field(
            array![[1.0, 1.0], [3.0, 3.0]],
            vec![1.0, 2.0],
            vec![0.0, PI],
        );
        let out = resample(&f, &[0.0, 1.5, 6.0]).unwrap();
        assert_eq!(out[0], 1.0);
        assert_relative_eq!(out[1], 2.0);
        assert_eq!(out[2], 3.0);
    }

    #[test]
    fn empty_axes_are_rejected() {
        let f = field(Array2::zeros((0, 2)), vec![], vec![0.0, PI]);
        assert!(matches!(
            resample(&f, &longitude_grid(8)),
            Err(BoundaryError::Parse { .. })
        ));
        let f = field(Array2::zeros((2, 0)), vec![0.0, 1.0], vec![]);
        assert!(matches!(
            equatorial_slice(&f),
            Err(BoundaryError::Parse { .. })
        ));
    }
}

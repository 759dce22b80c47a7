//! Read cached MAS boundary files into [`GriddedField`]s.
//!
//! Each file holds three datasets: the longitude axis, the colatitude axis
//! and the 2-D data grid indexed `[longitude][colatitude]`, all in radians
//! and MAS model units. The HDF backend is libnetcdf and is only compiled
//! with the `netcdf` feature.

use crate::error::BoundaryError;
use crate::field::{GriddedField, Quantity};
use ndarray::Array2;
use std::path::Path;

/// Longitude axis dataset (radians).
pub const LONGITUDE_DATASET: &str = "fakeDim0";
/// Colatitude axis dataset (radians).
pub const COLATITUDE_DATASET: &str = "fakeDim1";
/// Data grid dataset.
pub const DATA_DATASET: &str = "Data-Set-2";

/// Decodes one cached boundary file.
pub trait FieldReader {
    fn read_field(&self, path: &Path, quantity: Quantity) -> Result<GriddedField, BoundaryError>;

    /// False when this reader can never decode a file, so callers can stop
    /// before downloading anything.
    fn is_available(&self) -> bool {
        true
    }
}

/// Builds a field from a flat row-major grid of raw model values.
///
/// `dims` is the grid shape as stored. Either `(n_lon, n_colat)` or the
/// transposed `(n_colat, n_lon)` is accepted; anything else is a parse error.
pub fn assemble_field(
    quantity: Quantity,
    raw: Vec<f64>,
    dims: (usize, usize),
    longitude: Vec<f64>,
    colatitude: Vec<f64>,
    path: &Path,
) -> Result<GriddedField, BoundaryError> {
    if longitude.is_empty() || colatitude.is_empty() {
        return Err(BoundaryError::parse(path, "empty coordinate axis"));
    }
    let n_lon = longitude.len();
    let n_colat = colatitude.len();
    let grid = Array2::from_shape_vec(dims, raw).map_err(|e| BoundaryError::parse(path, e))?;
    let grid = if dims == (n_lon, n_colat) {
        grid
    } else if dims == (n_colat, n_lon) {
        grid.reversed_axes()
    } else {
        return Err(BoundaryError::parse(
            path,
            format!(
                "{} has shape {:?}, expected ({}, {})",
                DATA_DATASET, dims, n_lon, n_colat
            ),
        ));
    };
    GriddedField::from_model_units(quantity, grid, longitude, colatitude, path)
}

#[cfg(feature = "netcdf")]
mod backend {
    use super::*;

    /// libnetcdf-backed reader. HDF4 maps require a libnetcdf built with
    /// HDF4 support.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct NetcdfReader;

    fn read_1d(file: &netcdf::File, name: &str, path: &Path) -> Result<Vec<f64>, BoundaryError> {
        let var = file
            .variable(name)
            .ok_or_else(|| BoundaryError::parse(path, format!("missing dataset {name}")))?;
        var.get_values(..)
            .map_err(|e| BoundaryError::parse(path, format!("read {name}: {e}")))
    }

    impl FieldReader for NetcdfReader {
        fn read_field(
            &self,
            path: &Path,
            quantity: Quantity,
        ) -> Result<GriddedField, BoundaryError> {
            if !path.is_file() {
                return Err(BoundaryError::FileNotFound(path.to_path_buf()));
            }
            let file = netcdf::open(path).map_err(|e| BoundaryError::parse(path, e))?;

            let longitude = read_1d(&file, LONGITUDE_DATASET, path)?;
            let colatitude = read_1d(&file, COLATITUDE_DATASET, path)?;

            let data = file.variable(DATA_DATASET).ok_or_else(|| {
                BoundaryError::parse(path, format!("missing dataset {DATA_DATASET}"))
            })?;
            let dims: Vec<usize> = data.dimensions().iter().map(|d| d.len()).collect();
            let &[d0, d1] = dims.as_slice() else {
                return Err(BoundaryError::parse(
                    path,
                    format!("{DATA_DATASET} has {} dimensions, expected 2", dims.len()),
                ));
            };
            let raw: Vec<f64> = data
                .get_values(..)
                .map_err(|e| BoundaryError::parse(path, format!("read {DATA_DATASET}: {e}")))?;

            tracing::debug!(
                path = %path.display(),
                %quantity,
                n_lon = longitude.len(),
                n_colat = colatitude.len(),
                "read boundary map"
            );
            assemble_field(quantity, raw, (d0, d1), longitude, colatitude, path)
        }
    }
}

#[cfg(feature = "netcdf")]
pub use backend::NetcdfReader;

/// Stand-in used when no file-format backend is compiled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableReader;

impl FieldReader for UnavailableReader {
    fn read_field(&self, path: &Path, _quantity: Quantity) -> Result<GriddedField, BoundaryError> {
        if !path.is_file() {
            return Err(BoundaryError::FileNotFound(path.to_path_buf()));
        }
        Err(BoundaryError::ReaderUnavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// The best reader this build provides.
pub fn default_reader() -> Box<dyn FieldReader> {
    #[cfg(feature = "netcdf")]
    {
        Box::new(NetcdfReader)
    }
    #[cfg(not(feature = "netcdf"))]
    {
        Box::new(UnavailableReader)
    }
}


#[cfg(all(test, feature = "netcdf"))]
mod netcdf_tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::path::PathBuf;

    const LON: [f64; 3] = [0.0, 1.0, 2.0];
    const COLAT: [f64; 2] = [0.5, 1.5];

    /// Writes a 3 x 2 map. `transposed` stores the grid as [colatitude][longitude].
    fn write_map(dir: &Path, name: &str, transposed: bool) -> PathBuf {
        let path = dir.join(name);
        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension(LONGITUDE_DATASET, LON.len()).unwrap();
        file.add_dimension(COLATITUDE_DATASET, COLAT.len()).unwrap();

        let mut lon = file
            .add_variable::<f64>(LONGITUDE_DATASET, &[LONGITUDE_DATASET])
            .unwrap();
        lon.put_values(&LON[..], ..).unwrap();
        let mut colat = file
            .add_variable::<f64>(COLATITUDE_DATASET, &[COLATITUDE_DATASET])
            .unwrap();
        colat.put_values(&COLAT[..], ..).unwrap();

        // value(lon i, colat j) = 1 + 2i + j
        if transposed {
            let mut data = file
                .add_variable::<f64>(DATA_DATASET, &[COLATITUDE_DATASET, LONGITUDE_DATASET])
                .unwrap();
            data.put_values(&[1.0, 3.0, 5.0, 2.0, 4.0, 6.0][..], ..).unwrap();
        } else {
            let mut data = file
                .add_variable::<f64>(DATA_DATASET, &[LONGITUDE_DATASET, COLATITUDE_DATASET])
                .unwrap();
            data.put_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0][..], ..).unwrap();
        }
        drop(file);
        path
    }

    #[test]
    fn reads_axes_and_scales_velocity() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_map(dir.path(), "HelioMAS_CR2054_vr_r0.hdf", false);

        let f = NetcdfReader.read_field(&path, Quantity::RadialVelocity).unwrap();
        assert_eq!(f.longitude(), &LON[..]);
        assert_eq!(f.colatitude(), &COLAT[..]);
        assert_eq!(f.values().dim(), (3, 2));
        assert_relative_eq!(f.values()[[0, 0]], 481.0);
        assert_relative_eq!(f.values()[[1, 0]], 3.0 * 481.0);
        assert_relative_eq!(f.values()[[2, 1]], 6.0 * 481.0);
    }

    #[test]
    fn reads_transposed_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_map(dir.path(), "HelioMAS_CR2054_br_r0.hdf", true);

        let f = NetcdfReader.read_field(&path, Quantity::RadialField).unwrap();
        assert_eq!(f.values().dim(), (3, 2));
        assert_relative_eq!(f.values()[[1, 0]], 3.0);
        assert_relative_eq!(f.values()[[2, 1]], 6.0);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("HelioMAS_CR2054_vr_r0.hdf");
        let err = NetcdfReader
            .read_field(&path, Quantity::RadialVelocity)
            .unwrap_err();
        assert!(matches!(err, BoundaryError::FileNotFound(p) if p == path));
        assert!(NetcdfReader.is_available());
    }
}

//! Python bindings for hitmap via PyO3.
//!
//! Exposes HEALPix hit-map construction to Python as the `hitmaprs` module.

mod helpers;
mod hit_map;

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use hitmap::healpix::{validate_nside, HealpixGrid};

use crate::helpers::{scheme_from_nest, to_py_err};
use crate::hit_map::PyHitMap;

/// Convert RA/Dec positions into counts on a HEALPix grid.
///
/// Args:
///     ra: 1-D array of right ascensions in degrees, range [0, 360).
///     dec: 1-D array of declinations in degrees, range [-90, 90].
///     nside: HEALPix NSIDE. Default 64 (about 1 degree pixels).
///     nest: Use NESTED ordering instead of RING. Default False.
///
/// Returns:
///     uint64 numpy array of length 12 * nside**2 with the number of
///     pointings in each pixel.
///
/// Raises:
///     ValueError: if `ra` and `dec` differ in length, contain NaN/inf,
///         or `nside` is not a valid resolution.
#[pyfunction]
#[pyo3(signature = (ra, dec, nside = 64, nest = false))]
fn compute_hit_map<'py>(
    py: Python<'py>,
    ra: PyReadonlyArray1<f64>,
    dec: PyReadonlyArray1<f64>,
    nside: i64,
    nest: bool,
) -> PyResult<Bound<'py, PyArray1<u64>>> {
    let ra = ra.as_array().to_vec();
    let dec = dec.as_array().to_vec();
    let counts = if nest {
        let config = hitmap::HitMapConfig {
            nside: validate_nside(nside).map_err(to_py_err)?,
            scheme: hitmap::Scheme::Nested,
        };
        hitmap::HitMap::from_radec_deg(&ra, &dec, &config)
            .map_err(to_py_err)?
            .into_counts()
    } else {
        hitmap::compute_hit_map(&ra, &dec, nside).map_err(to_py_err)?
    };
    Ok(PyArray1::from_vec(py, counts))
}

/// HEALPix pixel indices of (theta, phi) angles in radians.
///
/// Args:
///     nside: HEALPix NSIDE.
///     theta: Colatitudes in radians, [0, pi].
///     phi: Longitudes in radians.
///     nest: Use NESTED ordering instead of RING. Default False.
#[pyfunction]
#[pyo3(signature = (nside, theta, phi, nest = false))]
fn ang2pix<'py>(
    py: Python<'py>,
    nside: i64,
    theta: PyReadonlyArray1<f64>,
    phi: PyReadonlyArray1<f64>,
    nest: bool,
) -> PyResult<Bound<'py, PyArray1<u64>>> {
    let nside = validate_nside(nside).map_err(to_py_err)?;
    let grid = HealpixGrid::new(nside, scheme_from_nest(nest)).map_err(to_py_err)?;
    let theta = theta.as_array().to_vec();
    let phi = phi.as_array().to_vec();
    let pixels =
        hitmap::hitmap::binner::pixel_indices(&grid, &theta, &phi).map_err(to_py_err)?;
    Ok(PyArray1::from_vec(py, pixels))
}

/// Number of pixels for a given NSIDE, 12 * nside**2.
#[pyfunction]
fn nside2npix(nside: i64) -> PyResult<u64> {
    let nside = validate_nside(nside).map_err(to_py_err)?;
    Ok(hitmap::healpix::nside2npix(nside))
}

/// hitmaprs: HEALPix hit maps for telescope pointings
#[pymodule]
fn hitmaprs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyHitMap>()?;
    m.add_function(wrap_pyfunction!(compute_hit_map, m)?)?;
    m.add_function(wrap_pyfunction!(ang2pix, m)?)?;
    m.add_function(wrap_pyfunction!(nside2npix, m)?)?;
    Ok(())
}

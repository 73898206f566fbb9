use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use hitmap::{HitMap, HitMapConfig, Scheme};

use crate::helpers::{scheme_from_nest, to_py_err};

/// A dense HEALPix hit map.
///
/// Example:
///     m = hitmaprs.HitMap(ra, dec, nside=64)
///     m.counts            # numpy array of 12 * nside**2 counts
///     m.save_to_file("hit_map_nside64.rkyv")
#[pyclass(name = "HitMap")]
pub(crate) struct PyHitMap {
    inner: HitMap,
}

#[pymethods]
impl PyHitMap {
    /// Bin RA/Dec pointings into a new hit map.
    ///
    /// Args:
    ///     ra: 1-D array of right ascensions in degrees.
    ///     dec: 1-D array of declinations in degrees, same length as `ra`.
    ///     nside: HEALPix NSIDE. Default 64.
    ///     nest: Use NESTED ordering instead of RING. Default False.
    #[new]
    #[pyo3(signature = (ra, dec, nside = 64, nest = false))]
    fn new(
        ra: PyReadonlyArray1<f64>,
        dec: PyReadonlyArray1<f64>,
        nside: i64,
        nest: bool,
    ) -> PyResult<Self> {
        let config = HitMapConfig {
            nside: hitmap::healpix::validate_nside(nside).map_err(to_py_err)?,
            scheme: scheme_from_nest(nest),
        };
        let ra = ra.as_array().to_vec();
        let dec = dec.as_array().to_vec();
        let inner = HitMap::from_radec_deg(&ra, &dec, &config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Load a map saved with `save_to_file`.
    #[staticmethod]
    fn load_from_file(path: &str) -> PyResult<Self> {
        let inner = HitMap::load_from_file(path)
            .map_err(|e| pyo3::exceptions::PyIOError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Save the map to a file (rkyv format).
    fn save_to_file(&self, path: &str) -> PyResult<()> {
        self.inner
            .save_to_file(path)
            .map_err(|e| pyo3::exceptions::PyIOError::new_err(e.to_string()))
    }

    /// Write covered pixels as `pixel,hits` CSV.
    fn write_csv(&self, path: &str) -> PyResult<()> {
        self.inner
            .write_csv(path)
            .map_err(|e| pyo3::exceptions::PyIOError::new_err(e.to_string()))
    }

    /// Sum counts into a coarser power-of-two NSIDE.
    fn degrade(&self, nside_out: u32) -> PyResult<Self> {
        let inner = self.inner.degrade(nside_out).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// The same map in the other ordering.
    fn reorder(&self, nest: bool) -> PyResult<Self> {
        let inner = self
            .inner
            .reorder(scheme_from_nest(nest))
            .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Per-pixel counts as a numpy array of uint64.
    #[getter]
    fn counts<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<u64>> {
        PyArray1::from_slice(py, self.inner.counts())
    }

    #[getter]
    fn nside(&self) -> u32 {
        self.inner.nside()
    }

    /// True for NESTED ordering.
    #[getter]
    fn nest(&self) -> bool {
        self.inner.scheme() == Scheme::Nested
    }

    #[getter]
    fn total_hits(&self) -> u64 {
        self.inner.total_hits()
    }

    #[getter]
    fn max_hits(&self) -> u64 {
        self.inner.max_hits()
    }

    #[getter]
    fn num_covered_cells(&self) -> usize {
        self.inner.num_covered_cells()
    }

    /// Fraction of the sky with at least one hit.
    #[getter]
    fn covered_fraction(&self) -> f64 {
        self.inner.covered_fraction()
    }

    /// Covered sky area in square degrees.
    #[getter]
    fn covered_area_deg2(&self) -> f64 {
        self.inner.covered_area_deg2()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "HitMap(nside={}, ordering={}, hits={}, covered={:.2}%)",
            self.inner.nside(),
            self.inner.scheme(),
            self.inner.total_hits(),
            100.0 * self.inner.covered_fraction(),
        )
    }
}

//! Hit maps: per-pixel observation counts on a HEALPix grid.
//!
//! A hit map answers "how many pointings fell in each cell of the sky" for one
//! observation set. The map is dense: every pixel of the grid has an entry,
//! zero when nothing landed there, so an index always addresses the same patch
//! of sky.
//!
//! The total of all counts always equals the number of input pointings.

pub mod binner;
pub mod io;
pub mod resample;

use std::f64::consts::PI;

use rkyv::{Archive, Deserialize, Serialize};
use tracing::info;

use crate::error::{HitMapError, Result};
use crate::healpix::{validate_nside, HealpixGrid, Scheme};
use crate::projection::project_radec_deg;

/// Count how many pointings fall in each pixel of a RING-ordered grid.
///
/// `longitude_deg` and `latitude_deg` are right ascension and declination in
/// degrees. The result has `12 * nside^2` entries and sums to the number of
/// pointings.
///
/// Fails with [`HitMapError::InvalidInput`] for sequences of different length
/// or non-finite coordinates, and with [`HitMapError::InvalidConfiguration`]
/// for `nside <= 0`. Nothing is allocated for the map before validation passes.
pub fn compute_hit_map(longitude_deg: &[f64], latitude_deg: &[f64], nside: i64) -> Result<Vec<u64>> {
    let config = HitMapConfig {
        nside: validate_nside(nside)?,
        scheme: Scheme::Ring,
    };
    HitMap::from_radec_deg(longitude_deg, latitude_deg, &config).map(HitMap::into_counts)
}

/// All-zero dense count array covering `grid`.
///
/// A map too large for memory is reported as a configuration error instead of
/// aborting the process.
pub(crate) fn zeroed_counts(grid: &HealpixGrid) -> Result<Vec<u64>> {
    let npix = grid.npix();
    let too_large = || {
        HitMapError::InvalidConfiguration(format!(
            "cannot allocate a dense map of {npix} pixels for nside {}",
            grid.nside()
        ))
    };
    let len = usize::try_from(npix).map_err(|_| too_large())?;
    let mut counts = Vec::new();
    counts.try_reserve_exact(len).map_err(|_| too_large())?;
    counts.resize(len, 0);
    Ok(counts)
}

/// Parameters controlling hit-map construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitMapConfig {
    /// HEALPix resolution. Default 64 (about 0.92° pixels), fine enough for
    /// large-scale coverage studies.
    pub nside: u32,
    /// Pixel ordering. Default RING.
    pub scheme: Scheme,
}

impl Default for HitMapConfig {
    fn default() -> Self {
        Self {
            nside: 64,
            scheme: Scheme::Ring,
        }
    }
}

impl HitMapConfig {
    pub fn grid(&self) -> Result<HealpixGrid> {
        HealpixGrid::new(self.nside, self.scheme)
    }
}

/// Dense per-pixel hit counts, serializable with rkyv.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct HitMap {
    nside: u32,
    scheme: Scheme,
    counts: Vec<u64>,
}

impl HitMap {
    /// An all-zero map for the configured grid.
    pub fn empty(config: &HitMapConfig) -> Result<Self> {
        let grid = config.grid()?;
        Ok(Self {
            nside: grid.nside(),
            scheme: grid.scheme(),
            counts: zeroed_counts(&grid)?,
        })
    }

    /// Wrap an existing count array; its length must be `12 * nside^2`.
    pub fn from_counts(nside: u32, scheme: Scheme, counts: Vec<u64>) -> Result<Self> {
        let grid = HealpixGrid::new(nside, scheme)?;
        if counts.len() as u64 != grid.npix() {
            return Err(HitMapError::InvalidInput(format!(
                "expected {} counts for nside {nside}, got {}",
                grid.npix(),
                counts.len()
            )));
        }
        Ok(Self {
            nside,
            scheme,
            counts,
        })
    }

    /// Build a map from RA/Dec pointings in degrees.
    pub fn from_radec_deg(ra_deg: &[f64], dec_deg: &[f64], config: &HitMapConfig) -> Result<Self> {
        let grid = config.grid()?;
        let angles = project_radec_deg(ra_deg, dec_deg)?;
        Self::bin(&grid, &angles.theta, &angles.phi)
    }

    /// Build a map from HEALPix angles (`theta` colatitude, `phi` longitude) in radians.
    pub fn from_angles(theta: &[f64], phi: &[f64], config: &HitMapConfig) -> Result<Self> {
        let grid = config.grid()?;
        Self::bin(&grid, theta, phi)
    }

    fn bin(grid: &HealpixGrid, theta: &[f64], phi: &[f64]) -> Result<Self> {
        info!(
            "Calculating number of hits on a HEALPix grid with NSIDE={} ({})",
            grid.nside(),
            grid.scheme()
        );
        let counts = binner::bin_angles(grid, theta, phi)?;
        Ok(Self {
            nside: grid.nside(),
            scheme: grid.scheme(),
            counts,
        })
    }

    pub fn nside(&self) -> u32 {
        self.nside
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The grid this map is defined on.
    pub fn grid(&self) -> Result<HealpixGrid> {
        HealpixGrid::new(self.nside, self.scheme)
    }

    /// Per-pixel counts, indexed by pixel number.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn into_counts(self) -> Vec<u64> {
        self.counts
    }

    /// Number of pixels (`12 * nside^2`), not the number of hits.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of pointings binned into this map.
    pub fn total_hits(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Largest count in any single pixel.
    pub fn max_hits(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Number of pixels with at least one hit.
    pub fn num_covered_cells(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// `(pixel, count)` for every pixel with at least one hit, ascending by pixel.
    pub fn covered_cells(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(pix, c)| (pix as u64, *c))
    }

    /// Fraction of the sky with at least one hit.
    pub fn covered_fraction(&self) -> f64 {
        self.num_covered_cells() as f64 / self.counts.len() as f64
    }

    /// Sky area with at least one hit, in square degrees.
    pub fn covered_area_deg2(&self) -> f64 {
        let full_sky_deg2 = 4.0 * PI * (180.0 / PI).powi(2);
        self.covered_fraction() * full_sky_deg2
    }

    /// Add the counts of another map on the same grid into this one.
    pub fn accumulate(&mut self, other: &HitMap) -> Result<()> {
        if self.nside != other.nside || self.scheme != other.scheme {
            return Err(HitMapError::InvalidConfiguration(format!(
                "cannot add a map with nside {} ({}) to a map with nside {} ({})",
                other.nside, other.scheme, self.nside, self.scheme
            )));
        }
        for (acc, &c) in self.counts.iter_mut().zip(&other.counts) {
            *acc += c;
        }
        Ok(())
    }
}

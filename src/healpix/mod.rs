//! HEALPix equal-area pixelization of the sphere.
//!
//! The sphere is split into 12 base faces, each subdivided into `nside^2`
//! pixels of identical solid angle, for a total of `12 * nside^2` pixels
//! (Górski et al. 2005, ApJ 622, 759). Pixel geometry comes from
//! [`cdshealpix`]; this module adapts it to the HEALPix angle convention and
//! to typed errors, so an index computed here addresses the same pixel as any
//! other HEALPix tool at the same `nside` and ordering.
//!
//! Angles follow the HEALPix convention: `theta` is the colatitude in
//! `[0, π]` measured from the north pole, `phi` the longitude in radians.
//!
//! ```
//! use hitmap::healpix::{HealpixGrid, Scheme};
//!
//! let grid = HealpixGrid::new(4, Scheme::Ring).unwrap();
//! assert_eq!(grid.npix(), 192);
//! assert_eq!(grid.ang2pix(0.0, 0.0).unwrap(), 0);
//! ```

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use cdshealpix::nested::{self, Layer};
use rkyv::{Archive, Deserialize, Serialize};

use crate::error::{HitMapError, Result};
use crate::Vector3;

/// Largest `nside` representable with 64-bit pixel indices.
pub const MAX_NSIDE: u32 = cdshealpix::NSIDE_MAX;

/// Pixel numbering scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Archive, Serialize, Deserialize)]
pub enum Scheme {
    /// Iso-latitude rings, north to south. Works for any `nside`.
    #[default]
    Ring,
    /// Hierarchical quad-tree within each base face. Requires a power-of-two `nside`.
    Nested,
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scheme::Ring => write!(f, "RING"),
            Scheme::Nested => write!(f, "NESTED"),
        }
    }
}

/// Check a resolution parameter coming from an untyped boundary.
pub fn validate_nside(nside: i64) -> Result<u32> {
    if nside <= 0 {
        return Err(HitMapError::InvalidConfiguration(format!(
            "nside must be a positive integer, got {nside}"
        )));
    }
    if nside > MAX_NSIDE as i64 {
        return Err(HitMapError::InvalidConfiguration(format!(
            "nside must not exceed {MAX_NSIDE}, got {nside}"
        )));
    }
    Ok(nside as u32)
}

/// Total number of pixels, `12 * nside^2`.
pub fn nside2npix(nside: u32) -> u64 {
    12 * nside as u64 * nside as u64
}

/// `log2(nside)` for power-of-two resolutions.
pub fn nside2order(nside: u32) -> Option<u32> {
    nside.is_power_of_two().then(|| nside.trailing_zeros())
}

/// Convert a NESTED pixel index to RING.
pub fn nest2ring(nside: u32, pix: u64) -> Result<u64> {
    let grid = HealpixGrid::new(nside, Scheme::Nested)?;
    grid.check_pix(pix)?;
    Ok(grid.layer().to_ring(pix))
}

/// Convert a RING pixel index to NESTED.
pub fn ring2nest(nside: u32, pix: u64) -> Result<u64> {
    let grid = HealpixGrid::new(nside, Scheme::Nested)?;
    grid.check_pix(pix)?;
    Ok(grid.layer().from_ring(pix))
}

/// A HEALPix tessellation at a fixed resolution and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealpixGrid {
    nside: u32,
    scheme: Scheme,
}

impl HealpixGrid {
    /// Create a grid, validating `nside` against the ordering.
    pub fn new(nside: u32, scheme: Scheme) -> Result<Self> {
        validate_nside(nside as i64)?;
        if scheme == Scheme::Nested && !nside.is_power_of_two() {
            return Err(HitMapError::InvalidConfiguration(format!(
                "NESTED ordering requires a power-of-two nside, got {nside}"
            )));
        }
        Ok(Self { nside, scheme })
    }

    pub fn nside(&self) -> u32 {
        self.nside
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Total number of pixels.
    pub fn npix(&self) -> u64 {
        nside2npix(self.nside)
    }

    /// Solid angle of a single pixel in steradians.
    pub fn pixel_area_sr(&self) -> f64 {
        4.0 * PI / self.npix() as f64
    }

    /// Approximate pixel size in radians (square root of the pixel area).
    pub fn resolution_rad(&self) -> f64 {
        self.pixel_area_sr().sqrt()
    }

    /// Pixel containing the direction `(theta, phi)`.
    ///
    /// `phi` is wrapped into `[0, 2π)`; `theta` is clamped into `[0, π]`.
    /// Non-finite angles are rejected with [`HitMapError::InvalidInput`].
    pub fn ang2pix(&self, theta: f64, phi: f64) -> Result<u64> {
        if !theta.is_finite() || !phi.is_finite() {
            return Err(HitMapError::InvalidInput(format!(
                "direction (theta={theta}, phi={phi}) is not finite"
            )));
        }
        let lat = FRAC_PI_2 - theta.clamp(0.0, PI);
        Ok(self.hash(wrap_longitude(phi), lat))
    }

    /// Pixel containing the direction of a (not necessarily unit) vector.
    ///
    /// The zero vector maps to the pixel at `theta = π/2, phi = 0`.
    pub fn vec2pix(&self, v: &Vector3) -> Result<u64> {
        if !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()) {
            return Err(HitMapError::InvalidInput(format!(
                "direction ({}, {}, {}) is not finite",
                v.x, v.y, v.z
            )));
        }
        let lon = v.y.atan2(v.x);
        let lat = v.z.atan2(v.x.hypot(v.y));
        Ok(self.hash(wrap_longitude(lon), lat))
    }

    /// Colatitude and longitude of the pixel center, in radians.
    pub fn pix2ang(&self, pix: u64) -> Result<(f64, f64)> {
        self.check_pix(pix)?;
        let (lon, lat) = match self.scheme {
            Scheme::Ring => cdshealpix::ring::center(self.nside, pix),
            Scheme::Nested => self.layer().center(pix),
        };
        Ok((FRAC_PI_2 - lat, wrap_longitude(lon)))
    }

    /// Unit vector through the pixel center.
    pub fn pix2vec(&self, pix: u64) -> Result<Vector3> {
        let (theta, phi) = self.pix2ang(pix)?;
        let (sin_theta, cos_theta) = theta.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        Ok(Vector3::new(
            sin_theta * cos_phi,
            sin_theta * sin_phi,
            cos_theta,
        ))
    }

    /// Index of `pix` in the other ordering of the same resolution.
    ///
    /// Identity when `scheme` matches this grid's ordering.
    pub fn convert(&self, pix: u64, scheme: Scheme) -> Result<u64> {
        match (self.scheme, scheme) {
            (Scheme::Ring, Scheme::Nested) => ring2nest(self.nside, pix),
            (Scheme::Nested, Scheme::Ring) => nest2ring(self.nside, pix),
            _ => {
                self.check_pix(pix)?;
                Ok(pix)
            }
        }
    }

    /// `lon` must lie in `[0, 2π)` and `lat` in `[-π/2, π/2]`.
    fn hash(&self, lon: f64, lat: f64) -> u64 {
        match self.scheme {
            Scheme::Ring => cdshealpix::ring::hash(self.nside, lon, lat),
            Scheme::Nested => self.layer().hash(lon, lat),
        }
    }

    /// NESTED layer at this resolution; only meaningful for power-of-two `nside`.
    fn layer(&self) -> &'static Layer {
        nested::get(self.nside.trailing_zeros() as u8)
    }

    fn check_pix(&self, pix: u64) -> Result<()> {
        if pix >= self.npix() {
            return Err(HitMapError::InvalidInput(format!(
                "pixel {pix} out of range for nside {} ({} pixels)",
                self.nside,
                self.npix()
            )));
        }
        Ok(())
    }
}

/// Longitude wrapped into `[0, 2π)`.
fn wrap_longitude(phi: f64) -> f64 {
    let lon = phi.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly 2π
    if lon >= TAU {
        0.0
    } else {
        lon
    }
}

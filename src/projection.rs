//! Conversion of sky coordinates in degrees to HEALPix angles.
//!
//! Pointing data arrives as longitude-like (right ascension) and latitude-like
//! (declination) values in degrees. The pixelization works with colatitude
//! `theta = 90° - dec` and longitude `phi = ra`, both in radians.

use crate::error::{HitMapError, Result};
use crate::Vector3;

/// A single pointing on the celestial sphere, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointing {
    pub ra_deg: f64,
    pub dec_deg: f64,
}

impl Pointing {
    pub fn new(ra_deg: f64, dec_deg: f64) -> Self {
        Self { ra_deg, dec_deg }
    }

    /// HEALPix colatitude in radians.
    pub fn theta(&self) -> f64 {
        (90.0 - self.dec_deg).to_radians()
    }

    /// HEALPix longitude in radians.
    pub fn phi(&self) -> f64 {
        self.ra_deg.to_radians()
    }

    /// Unit vector pointing to this position on the celestial sphere.
    pub fn uvec(&self) -> Vector3 {
        let (sin_ra, cos_ra) = self.ra_deg.to_radians().sin_cos();
        let (sin_dec, cos_dec) = self.dec_deg.to_radians().sin_cos();
        Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
    }
}

/// Projected angles, one entry per input pointing and in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedAngles {
    /// Colatitude in radians.
    pub theta: Vec<f64>,
    /// Longitude in radians.
    pub phi: Vec<f64>,
}

impl ProjectedAngles {
    pub fn len(&self) -> usize {
        self.theta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }
}

/// Project equal-length RA/Dec sequences (degrees) to `(theta, phi)` in radians.
///
/// Out-of-range but finite values are passed through; the pixelization wraps
/// longitude and clamps colatitude. NaN or infinite values are rejected.
pub fn project_radec_deg(ra_deg: &[f64], dec_deg: &[f64]) -> Result<ProjectedAngles> {
    check_coordinates(ra_deg, dec_deg)?;

    let theta = dec_deg.iter().map(|dec| (90.0 - dec).to_radians()).collect();
    let phi = ra_deg.iter().map(|ra| ra.to_radians()).collect();
    Ok(ProjectedAngles { theta, phi })
}

/// Validate a pair of coordinate sequences without projecting them.
pub(crate) fn check_coordinates(lon: &[f64], lat: &[f64]) -> Result<()> {
    check_lengths(lon.len(), lat.len())?;
    check_finite("longitude", lon)?;
    check_finite("latitude", lat)
}

pub(crate) fn check_lengths(lon_len: usize, lat_len: usize) -> Result<()> {
    if lon_len != lat_len {
        return Err(HitMapError::InvalidInput(format!(
            "coordinate sequences differ in length: {lon_len} longitudes, {lat_len} latitudes"
        )));
    }
    Ok(())
}

pub(crate) fn check_finite(name: &str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(HitMapError::InvalidInput(format!(
            "{name}[{idx}] is not finite ({})",
            values[idx]
        ))),
        None => Ok(()),
    }
}

//! Binning of projected angles into HEALPix pixels and aggregation into a
//! dense count array.

use tracing::debug;

use super::zeroed_counts;
use crate::error::HitMapError;
use crate::healpix::HealpixGrid;
use crate::projection::{check_finite, check_lengths};
use crate::Result;

/// Pixel index of every `(theta, phi)` pair, in input order.
pub fn pixel_indices(grid: &HealpixGrid, theta: &[f64], phi: &[f64]) -> Result<Vec<u64>> {
    check_angles(theta, phi)?;
    theta
        .iter()
        .zip(phi)
        .map(|(&t, &p)| grid.ang2pix(t, p))
        .collect()
}

/// Dense per-pixel counts of a stream of pixel indices.
///
/// An index outside `[0, grid.npix())` is rejected as invalid input.
pub fn count_pixels(grid: &HealpixGrid, indices: &[u64]) -> Result<Vec<u64>> {
    if let Some(&pix) = indices.iter().find(|&&pix| pix >= grid.npix()) {
        return Err(HitMapError::InvalidInput(format!(
            "pixel {pix} out of range for nside {} ({} pixels)",
            grid.nside(),
            grid.npix()
        )));
    }
    let mut counts = zeroed_counts(grid)?;
    for &pix in indices {
        counts[pix as usize] += 1;
    }
    log_binned(indices.len(), &counts);
    Ok(counts)
}

/// Bin projected angles into a dense count array of length `grid.npix()`.
///
/// Inputs are validated and the map allocated before any pixel is computed.
pub fn bin_angles(grid: &HealpixGrid, theta: &[f64], phi: &[f64]) -> Result<Vec<u64>> {
    check_angles(theta, phi)?;
    let mut counts = zeroed_counts(grid)?;
    for (&t, &p) in theta.iter().zip(phi) {
        counts[grid.ang2pix(t, p)? as usize] += 1;
    }
    log_binned(theta.len(), &counts);
    Ok(counts)
}

fn check_angles(theta: &[f64], phi: &[f64]) -> Result<()> {
    check_lengths(phi.len(), theta.len())?;
    check_finite("phi", phi)?;
    check_finite("theta", theta)
}

fn log_binned(samples: usize, counts: &[u64]) {
    debug!(
        "Binned {} samples into {} pixels ({} non-zero)",
        samples,
        counts.len(),
        counts.iter().filter(|&&c| c > 0).count()
    );
}

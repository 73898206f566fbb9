//! Changing the resolution or pixel ordering of a hit map.
//!
//! Both operations rely on the NESTED quad-tree, so they need a power-of-two
//! `nside`. Counts are moved, never interpolated, and the total is conserved.

use tracing::debug;

use super::{zeroed_counts, HitMap};
use crate::error::{HitMapError, Result};
use crate::healpix::{nside2order, HealpixGrid, Scheme};

impl HitMap {
    /// Sum counts into a coarser grid with `nside_out <= nside`.
    ///
    /// The output keeps this map's ordering. Each output pixel holds the total
    /// of its `(nside / nside_out)^2` children.
    pub fn degrade(&self, nside_out: u32) -> Result<HitMap> {
        let (Some(order_in), Some(order_out)) = (nside2order(self.nside), nside2order(nside_out))
        else {
            return Err(HitMapError::InvalidConfiguration(format!(
                "degrading requires power-of-two nside values, got {} -> {nside_out}",
                self.nside
            )));
        };
        if order_out > order_in {
            return Err(HitMapError::InvalidConfiguration(format!(
                "cannot degrade nside {} to a finer nside {nside_out}",
                self.nside
            )));
        }

        let grid_in = self.grid()?;
        let grid_out = HealpixGrid::new(nside_out, self.scheme)?;
        let shift = 2 * (order_in - order_out);

        let mut counts = zeroed_counts(&grid_out)?;
        for (pix, count) in self.covered_cells() {
            let parent = grid_in.convert(pix, Scheme::Nested)? >> shift;
            let out = match self.scheme {
                Scheme::Nested => parent,
                Scheme::Ring => HealpixGrid::new(nside_out, Scheme::Nested)?
                    .convert(parent, Scheme::Ring)?,
            };
            counts[out as usize] += count;
        }
        debug!("Degraded hit map from nside {} to {}", self.nside, nside_out);

        HitMap::from_counts(nside_out, self.scheme, counts)
    }

    /// The same map with pixels renumbered in another ordering.
    pub fn reorder(&self, scheme: Scheme) -> Result<HitMap> {
        if scheme == self.scheme {
            return Ok(self.clone());
        }
        let grid = self.grid()?;
        let mut counts = zeroed_counts(&grid)?;
        for (pix, count) in self.covered_cells() {
            counts[grid.convert(pix, scheme)? as usize] = count;
        }
        HitMap::from_counts(self.nside, scheme, counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hitmap::HitMapConfig;

    fn sample_map(nside: u32, scheme: Scheme) -> HitMap {
        let ra: Vec<f64> = (0..500).map(|i| (i as f64 * 7.3) % 360.0).collect();
        let dec: Vec<f64> = (0..500).map(|i| (i as f64 * 3.1) % 180.0 - 90.0).collect();
        HitMap::from_radec_deg(&ra, &dec, &HitMapConfig { nside, scheme }).unwrap()
    }

    #[test]
    fn degrade_matches_direct_binning() {
        for scheme in [Scheme::Ring, Scheme::Nested] {
            let fine = sample_map(32, scheme);
            let coarse = fine.degrade(8).unwrap();
            assert_eq!(coarse.nside(), 8);
            assert_eq!(coarse.scheme(), scheme);
            assert_eq!(coarse.total_hits(), 500);
            assert_eq!(coarse, sample_map(8, scheme));
        }
    }

    #[test]
    fn degrade_to_same_nside_is_identity() {
        let map = sample_map(16, Scheme::Ring);
        assert_eq!(map.degrade(16).unwrap(), map);
    }

    #[test]
    fn degrade_rejects_bad_targets() {
        let map = sample_map(16, Scheme::Ring);
        assert!(map.degrade(32).is_err());
        assert!(map.degrade(3).is_err());
        assert!(map.degrade(0).is_err());
        let odd = sample_map(6, Scheme::Ring);
        assert!(odd.degrade(2).is_err());
    }

    #[test]
    fn reorder_round_trip() {
        let ring = sample_map(16, Scheme::Ring);
        let nested = ring.reorder(Scheme::Nested).unwrap();
        assert_eq!(nested, sample_map(16, Scheme::Nested));
        assert_eq!(nested.reorder(Scheme::Ring).unwrap(), ring);
        assert_eq!(ring.reorder(Scheme::Ring).unwrap(), ring);
    }
}

//! Adapters that pull pointing coordinates out of files.
//!
//! The hit-map core only needs two equal-length sequences of RA and Dec in
//! degrees. Each source knows one on-disk layout and produces those sequences;
//! nothing downstream depends on where they came from.

pub mod columns;
pub mod tabular;

pub use self::columns::ColumnPointings;
pub use self::tabular::CsvPointings;

use crate::hitmap::{HitMap, HitMapConfig};
use crate::projection::Pointing;

/// Right ascension and declination sequences in degrees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaDec {
    pub ra_deg: Vec<f64>,
    pub dec_deg: Vec<f64>,
}

impl RaDec {
    pub fn push(&mut self, ra_deg: f64, dec_deg: f64) {
        self.ra_deg.push(ra_deg);
        self.dec_deg.push(dec_deg);
    }

    pub fn len(&self) -> usize {
        self.ra_deg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ra_deg.is_empty()
    }

    /// Bin these pointings into a hit map.
    pub fn hit_map(&self, config: &HitMapConfig) -> crate::Result<HitMap> {
        HitMap::from_radec_deg(&self.ra_deg, &self.dec_deg, config)
    }

    pub fn pointings(&self) -> impl Iterator<Item = Pointing> + '_ {
        self.ra_deg
            .iter()
            .zip(&self.dec_deg)
            .map(|(&ra, &dec)| Pointing::new(ra, dec))
    }
}

/// Anything that can supply pointing coordinates.
pub trait PointingSource {
    fn load_radec(&self) -> anyhow::Result<RaDec>;
}

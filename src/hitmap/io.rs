//! Persistence of hit maps.
//!
//! Maps are stored with rkyv for lossless reloading; the CSV writer emits only
//! covered pixels as `pixel,hits` rows for inspection or hand-off to other
//! tools.

use std::path::Path;

use tracing::info;

use super::HitMap;

impl HitMap {
    /// Serialize the map to bytes using rkyv.
    pub fn to_rkyv_bytes(&self) -> anyhow::Result<Vec<u8>> {
        let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(self)
            .map_err(|e| anyhow::anyhow!("rkyv serialization failed: {}", e))?;
        Ok(bytes.to_vec())
    }

    /// Deserialize a map produced by [`HitMap::to_rkyv_bytes`].
    pub fn from_rkyv_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let mut aligned = rkyv::util::AlignedVec::<16>::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);
        let map = rkyv::from_bytes::<Self, rkyv::rancor::Error>(&aligned)
            .map_err(|e| anyhow::anyhow!("rkyv deserialization failed: {}", e))?;
        // Re-validate the geometry of data coming from outside.
        Ok(HitMap::from_counts(map.nside, map.scheme, map.counts)?)
    }

    /// Save the map to a file using rkyv.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let bytes = self.to_rkyv_bytes()?;
        std::fs::write(path, &bytes)?;
        info!("Saved hit map to {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    /// Load a map from an rkyv file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let map = Self::from_rkyv_bytes(&bytes)?;
        info!(
            "Loaded hit map from {}: nside={}, {} hits in {} pixels",
            path.display(),
            map.nside,
            map.total_hits(),
            map.num_covered_cells()
        );
        Ok(map)
    }

    /// Write covered pixels as CSV with a `pixel,hits` header.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_path(path.as_ref())?;
        wtr.write_record(["pixel", "hits"])?;
        for (pix, hits) in self.covered_cells() {
            wtr.write_record([pix.to_string(), hits.to_string()])?;
        }
        wtr.flush()?;
        info!(
            "Wrote {} covered pixels to {}",
            self.num_covered_cells(),
            path.as_ref().display()
        );
        Ok(())
    }
}

//! Pointings stored as CSV with named RA/Dec columns.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use tracing::info;

use super::{PointingSource, RaDec};

/// A CSV file with a header row naming the RA and Dec columns (degrees).
#[derive(Debug, Clone)]
pub struct CsvPointings {
    pub path: PathBuf,
    pub ra_column: String,
    pub dec_column: String,
}

impl CsvPointings {
    /// Read columns `ra` and `dec` from `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ra_column: "ra".to_string(),
            dec_column: "dec".to_string(),
        }
    }

    pub fn with_columns(mut self, ra_column: &str, dec_column: &str) -> Self {
        self.ra_column = ra_column.to_string();
        self.dec_column = dec_column.to_string();
        self
    }
}

impl PointingSource for CsvPointings {
    fn load_radec(&self) -> anyhow::Result<RaDec> {
        info!("Reading pointing information from {}", self.path.display());
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_path(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;

        let headers = rdr.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| anyhow!("column '{}' not found in {}", name, self.path.display()))
        };
        let ra_idx = column(&self.ra_column)?;
        let dec_idx = column(&self.dec_column)?;

        let mut out = RaDec::default();
        for (row, result) in rdr.records().enumerate() {
            let record = result?;
            let field = |idx: usize, name: &str| -> anyhow::Result<f64> {
                let raw = record.get(idx).unwrap_or("");
                raw.parse()
                    .with_context(|| format!("row {}: invalid {} value '{}'", row + 1, name, raw))
            };
            out.push(field(ra_idx, &self.ra_column)?, field(dec_idx, &self.dec_column)?);
        }
        info!("Read {} pointings", out.len());
        Ok(out)
    }
}

//! Pointings stored as plain whitespace-separated `ra dec` columns.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::info;

use super::{PointingSource, RaDec};

/// A text file with one `ra dec` pair (degrees) per line.
///
/// Blank lines and lines starting with `#` are skipped. Extra columns after
/// the first two are ignored.
#[derive(Debug, Clone)]
pub struct ColumnPointings {
    pub path: PathBuf,
}

impl ColumnPointings {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// Parse `ra dec` lines from an in-memory string.
pub fn parse_columns(data: &str) -> anyhow::Result<RaDec> {
    let mut out = RaDec::default();
    for (lineno, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(ra), Some(dec)) = (fields.next(), fields.next()) else {
            bail!("line {}: expected two columns, got '{}'", lineno + 1, line);
        };
        let ra: f64 = ra
            .parse()
            .with_context(|| format!("line {}: invalid RA '{}'", lineno + 1, ra))?;
        let dec: f64 = dec
            .parse()
            .with_context(|| format!("line {}: invalid Dec '{}'", lineno + 1, dec))?;
        out.push(ra, dec);
    }
    Ok(out)
}

impl PointingSource for ColumnPointings {
    fn load_radec(&self) -> anyhow::Result<RaDec> {
        info!("Reading pointing information from {}", self.path.display());
        let data = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let out = parse_columns(&data)?;
        info!("Read {} pointings", out.len());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_and_blank_lines() {
        let data = "# ra dec\n\n10.0 -5.0\n  20.5\t7.25 extra\n";
        let radec = parse_columns(data).unwrap();
        assert_eq!(radec.ra_deg, vec![10.0, 20.5]);
        assert_eq!(radec.dec_deg, vec![-5.0, 7.25]);
    }

    #[test]
    fn reports_line_numbers() {
        let err = parse_columns("1 2\n3\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
        let err = parse_columns("1 2\n3 x\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!("hitmap-{}-cols.txt", std::process::id()));
        std::fs::write(&path, "0 0\n0 0\n180 -90\n").unwrap();
        let radec = ColumnPointings::new(&path).load_radec().unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(radec.len(), 3);
        assert!(ColumnPointings::new("/nonexistent/pointings.txt").load_radec().is_err());
    }
}

//! Make a HEALPix hit map from a file of telescope pointings.
//!
//! Reads RA/Dec pointings (degrees), counts the number of samples in each
//! HEALPix pixel and saves the dense map.
//!
//! Usage:
//! ```text
//! hit_map --input block_1675632179.csv --nside 64 --output hit_map_nside64.rkyv
//! hit_map --input scan.txt --format columns --nested --csv covered.csv
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use hitmap::{ColumnPointings, CsvPointings, HitMapConfig, PointingSource, Scheme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// CSV with a header row naming the RA and Dec columns
    Csv,
    /// Whitespace-separated `ra dec` columns
    Columns,
}

#[derive(Parser, Debug)]
#[command(name = "hit_map")]
#[command(about = "Count telescope pointings per HEALPix pixel")]
#[command(version)]
struct Args {
    /// File with RA/Dec pointings in degrees
    #[arg(short, long)]
    input: PathBuf,

    /// Input layout; guessed from the file extension when omitted
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// RA column name for CSV input
    #[arg(long, default_value = "ra")]
    ra_column: String,

    /// Dec column name for CSV input
    #[arg(long, default_value = "dec")]
    dec_column: String,

    /// NSIDE of the HEALPix hit map
    #[arg(short, long, default_value_t = 64)]
    nside: i64,

    /// Use NESTED pixel ordering instead of RING
    #[arg(long, default_value_t = false)]
    nested: bool,

    /// Output file for the dense map (rkyv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write covered pixels as `pixel,hits` CSV
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl Args {
    fn input_format(&self) -> InputFormat {
        self.format.unwrap_or_else(|| {
            match self.input.extension().and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
                _ => InputFormat::Columns,
            }
        })
    }

    fn source(&self) -> Box<dyn PointingSource> {
        match self.input_format() {
            InputFormat::Csv => Box::new(
                CsvPointings::new(&self.input).with_columns(&self.ra_column, &self.dec_column),
            ),
            InputFormat::Columns => Box::new(ColumnPointings::new(&self.input)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = HitMapConfig {
        nside: hitmap::healpix::validate_nside(args.nside)?,
        scheme: if args.nested {
            Scheme::Nested
        } else {
            Scheme::Ring
        },
    };
    // Fail on a bad grid before touching the input file.
    config.grid()?;

    let radec = args
        .source()
        .load_radec()
        .with_context(|| format!("loading pointings from {}", args.input.display()))?;

    let map = radec.hit_map(&config)?;
    info!(
        "{} hits in {} of {} pixels ({:.2}% of the sky, {:.1} deg²), max {} hits per pixel",
        map.total_hits(),
        map.num_covered_cells(),
        map.len(),
        100.0 * map.covered_fraction(),
        map.covered_area_deg2(),
        map.max_hits()
    );

    if let Some(output) = &args.output {
        info!("Saving results to: {}", output.display());
        map.save_to_file(output)?;
    }
    if let Some(csv) = &args.csv {
        map.write_csv(csv)?;
    }

    info!("Done!");
    Ok(())
}

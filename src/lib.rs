//! # hitmap
//!
//! Sky coverage ("hit") maps for telescope scans on the HEALPix grid.
//!
//! Given the pointing of a telescope sampled during a scan, as right
//! ascension / declination pairs in degrees, `hitmap` counts how many samples
//! fall in each pixel of a HEALPix tessellation of the sphere. The result is a
//! dense array of `12 * nside^2` counts indexed by HEALPix pixel number, ready
//! for survey depth and footprint studies.
//!
//! ## Example
//!
//! ```
//! use hitmap::{compute_hit_map, HitMap, HitMapConfig, Scheme};
//!
//! let ra = [0.0, 0.0, 180.0];
//! let dec = [0.0, 0.0, -90.0];
//!
//! // Plain count array, RING ordering
//! let counts = compute_hit_map(&ra, &dec, 4).unwrap();
//! assert_eq!(counts.len(), 192);
//! assert_eq!(counts.iter().sum::<u64>(), 3);
//!
//! // Or a HitMap with statistics, resampling and persistence
//! let config = HitMapConfig { nside: 4, scheme: Scheme::Nested };
//! let map = HitMap::from_radec_deg(&ra, &dec, &config).unwrap();
//! assert_eq!(map.num_covered_cells(), 2);
//! assert_eq!(map.degrade(1).unwrap().total_hits(), 3);
//! ```
//!
//! ## Pipeline
//!
//! 1. **Projection**: `(ra, dec)` in degrees become HEALPix angles
//!    `theta = 90° - dec` (colatitude) and `phi = ra`, in radians
//! 2. **Pixelization**: each `(theta, phi)` maps to one pixel index with the
//!    standard HEALPix `ang2pix`, in RING or NESTED ordering
//! 3. **Aggregation**: indices are counted into a zero-initialised dense
//!    array, so the counts always sum to the number of pointings
//!
//! Pointing files are read through the adapters in [`sources`]; the core never
//! touches the file system.
//!

pub mod error;
pub mod healpix;
pub mod hitmap;
pub mod projection;
pub mod sources;

pub use error::{HitMapError, Result};
pub use healpix::{HealpixGrid, Scheme};
pub use hitmap::{compute_hit_map, HitMap, HitMapConfig};
pub use projection::{project_radec_deg, Pointing, ProjectedAngles};
pub use sources::{ColumnPointings, CsvPointings, PointingSource, RaDec};

// Direction vectors on the unit sphere
pub type Vector3 = nalgebra::Vector3<f64>;

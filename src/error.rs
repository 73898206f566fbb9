//! Typed failures of the hit-map core.
//!
//! Every error is raised before the output map is allocated, so a caller never
//! observes a partially filled map.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HitMapError {
    /// The caller broke the input contract: coordinate sequences of different
    /// lengths, or a coordinate that is NaN or infinite.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The grid parameters cannot describe a HEALPix tessellation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, HitMapError>;

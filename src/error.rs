use std::io;

use thiserror::Error;

pub type PatternResult<T> = Result<T, PatternError>;

// Everything that can go wrong before a gain field exists. Numeric degeneracies
// inside an evaluation are not errors; they resolve to zero gain.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("segment count must be at least 2, got {0}")]
    InvalidSegmentCount(usize),

    #[error("wire length must be positive and finite, got {0}")]
    InvalidLength(f64),

    #[error("harmonic order must be at least 1, got {0}")]
    InvalidHarmonic(u32),

    #[error("feed fraction must lie strictly between 0 and 1, got {0}")]
    InvalidFeedFraction(f64),

    #[error("{name} must lie in [0, 90) degrees, got {value}")]
    InvalidAngle { name: &'static str, value: f64 },

    #[error("sphere subdivision must be at least 1, got {0}")]
    InvalidSubdivision(usize),

    #[error("gain field has {actual} values but the mesh has {expected} vertices")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

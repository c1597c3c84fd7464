//! Error types for fftcheck

use crate::dtype::Precision;
use thiserror::Error;

/// Result type alias using fftcheck's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while verifying a transform engine
#[derive(Error, Debug)]
pub enum Error {
    /// No legal dimension exists at or above the requested extent
    #[error("no legal dimension >= {requested} below ceiling {ceiling}")]
    NoLegalDimension {
        /// Requested extent
        requested: usize,
        /// Search ceiling
        ceiling: usize,
    },

    /// Precision argument not recognized
    #[error("unsupported precision '{arg}' (expected 'single' or 'double')")]
    UnsupportedPrecision {
        /// The offending argument
        arg: String,
    },

    /// Engine limitation - case is valid but exceeds engine capabilities.
    /// The orchestrator skips such cases instead of failing the run.
    #[error("{engine} cannot run this case: {reason}")]
    UnsupportedCase {
        /// The engine that declined the case
        engine: &'static str,
        /// Description of the limitation
        reason: String,
    },

    /// Tolerance comparator rejected an engine result
    #[error(
        "{engine} {stage} mismatch for {kind} {x}x{y}x{z} ({precision:?}): \
         worst error {max_rel_error:.3e} at element {worst_index} (tolerance {tolerance:.3e}, \
         {mismatches} elements out of tolerance)"
    )]
    Mismatch {
        /// The engine under test
        engine: &'static str,
        /// Which check rejected: "forward" or "round-trip"
        stage: &'static str,
        /// Transform kind label
        kind: &'static str,
        /// Normalized x extent
        x: usize,
        /// Normalized y extent
        y: usize,
        /// Normalized z extent
        z: usize,
        /// Numeric precision of the case
        precision: Precision,
        /// Largest scaled error observed
        max_rel_error: f64,
        /// Flat index of the worst element in the compared sequence
        worst_index: usize,
        /// Tolerance the comparison ran with
        tolerance: f64,
        /// Number of out-of-tolerance elements
        mismatches: usize,
    },

    /// Host/device transfer size did not match the grid
    #[error("grid transfer size mismatch: grid holds {grid_bytes} bytes, host buffer {host_bytes}")]
    GridSizeMismatch {
        /// Bytes the grid was allocated with
        grid_bytes: usize,
        /// Bytes on the host side
        host_bytes: usize,
    },

    /// Out of memory
    #[error("failed to allocate {size} bytes of grid memory")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an unsupported-case signal for `engine`
    pub fn unsupported_case(engine: &'static str, reason: impl Into<String>) -> Self {
        Self::UnsupportedCase {
            engine,
            reason: reason.into(),
        }
    }

    /// True if this error is the skip signal rather than a failure
    pub fn is_unsupported_case(&self) -> bool {
        matches!(self, Self::UnsupportedCase { .. })
    }
}

//! Legal-dimension resolution
//!
//! Engines constrain volume extents to what their decomposition supports.
//! The resolver maps a requested extent to the smallest legal extent at
//! or above it, so every engine sees a shape it can process and the
//! oracle always receives the same normalized shape. Scanning upward from
//! the request makes the result deterministic and monotonic by
//! construction.

use crate::case::Dims3;
use crate::engine::Fft3dEngine;
use crate::error::{Error, Result};

/// Upper bound of the legal-dimension search
///
/// Exceeding it is a configuration error, not a transform failure: no
/// shipped case comes near it, so hitting the ceiling means the engine's
/// legality predicate is broken or the request is nonsense.
pub const DIMENSION_CEILING: usize = 2048;

/// Smallest extent >= `requested` that `engine` can process
pub fn find_legal_dimension(engine: &dyn Fft3dEngine, requested: usize) -> Result<usize> {
    let start = requested.max(1);
    (start..=DIMENSION_CEILING)
        .find(|&n| engine.is_legal_dimension(n))
        .ok_or(Error::NoLegalDimension {
            requested,
            ceiling: DIMENSION_CEILING,
        })
}

/// Normalize all three extents of a requested shape for `engine`
pub fn normalize_dims(engine: &dyn Fft3dEngine, requested: Dims3) -> Result<Dims3> {
    Ok(Dims3::new(
        find_legal_dimension(engine, requested.x)?,
        find_legal_dimension(engine, requested.y)?,
        find_legal_dimension(engine, requested.z)?,
    ))
}

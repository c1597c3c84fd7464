//! Transform case descriptors and the shipped verification matrix
//!
//! A [`TransformCase`] is an immutable description of one verification
//! unit: requested extents, transform kind, precision, and the per-case
//! tolerance widening. The orchestrator enumerates cases, normalizes their
//! extents per engine, and never mutates them.

use crate::dtype::Precision;

/// Extents of a 3D volume in (x, y, z) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dims3 {
    /// Slowest-varying extent
    pub x: usize,
    /// Middle extent
    pub y: usize,
    /// Fastest-varying (contiguous) extent
    pub z: usize,
}

impl Dims3 {
    /// Create extents from (x, y, z)
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Number of samples in the dense volume
    pub fn volume(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Extents as an array, x first
    pub fn as_array(&self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }
}

impl std::fmt::Display for Dims3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

/// Which transform an engine is asked to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Dense complex input, dense complex output
    ComplexToComplex,
    /// Real input, Hermitian-packed complex output
    RealToComplex,
}

impl TransformKind {
    /// Display label used in console output and diagnostics
    pub fn label(self) -> &'static str {
        match self {
            Self::ComplexToComplex => "complex-to-complex",
            Self::RealToComplex => "real-to-complex",
        }
    }
}

/// One verification unit of the case matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformCase {
    /// Requested extents (normalized per engine before execution)
    pub dims: Dims3,
    /// Transform kind
    pub kind: TransformKind,
    /// Numeric precision the engine must run in
    pub precision: Precision,
    /// Per-case multiplier applied on top of the base tolerance
    pub tolerance_scale: f64,
}

impl TransformCase {
    /// Create a case with the default tolerance scale of 1.0
    pub fn new(dims: Dims3, kind: TransformKind, precision: Precision) -> Self {
        Self {
            dims,
            kind,
            precision,
            tolerance_scale: 1.0,
        }
    }

    /// Widen the acceptable error for a harder case
    pub fn with_tolerance_scale(mut self, scale: f64) -> Self {
        debug_assert!(scale > 0.0);
        self.tolerance_scale = scale;
        self
    }

    /// Same case with different extents (used after shape normalization)
    pub fn with_dims(mut self, dims: Dims3) -> Self {
        self.dims = dims;
        self
    }
}

/// The shipped verification matrix for one precision
///
/// Shapes cover regular and irregular extents, cubes, and flat volumes.
/// The four largest cases get a 10x tolerance widening in single
/// precision; the widening is per-case configuration, not a formula.
pub fn case_matrix(precision: Precision) -> Vec<TransformCase> {
    use TransformKind::{ComplexToComplex, RealToComplex};

    let large_scale = match precision {
        Precision::Single => 10.0,
        Precision::Double => 1.0,
    };

    let case = |x, y, z, kind| TransformCase::new(Dims3::new(x, y, z), kind, precision);

    vec![
        case(28, 25, 30, ComplexToComplex),
        case(28, 25, 25, RealToComplex),
        case(25, 28, 25, RealToComplex),
        case(25, 25, 28, RealToComplex),
        case(21, 25, 27, RealToComplex),
        case(49, 98, 14, RealToComplex),
        case(7, 21, 98, RealToComplex),
        case(98, 21, 21, RealToComplex),
        case(18, 98, 6, RealToComplex),
        case(50, 50, 50, RealToComplex),
        case(60, 60, 60, RealToComplex),
        case(64, 64, 64, ComplexToComplex),
        case(100, 140, 88, ComplexToComplex).with_tolerance_scale(large_scale),
        case(120, 243, 120, RealToComplex).with_tolerance_scale(large_scale),
        case(216, 216, 116, RealToComplex).with_tolerance_scale(large_scale),
        case(98, 98, 98, RealToComplex).with_tolerance_scale(large_scale),
    ]
}

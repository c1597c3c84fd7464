//! # fftcheck
//!
//! **Correctness-verification harness for accelerator 3D FFT engines.**
//!
//! fftcheck decides, automatically and reproducibly, whether a transform
//! engine computes the mathematically correct result across a matrix of
//! shapes, transform kinds, and precisions. Engines are compared against
//! a definition-direct reference oracle; nothing about an engine's
//! internals leaks past its adapter.
//!
//! ## Architecture
//!
//! ```text
//! harness (orchestrator)
//! ├── case      (test matrix descriptors)
//! ├── stimulus  (seeded pseudorandom volumes)
//! ├── resolve   (per-engine legal-dimension normalization)
//! ├── engine    (capability contract + bundled engines)
//! ├── oracle    (trusted host-memory 3D DFT)
//! ├── layout    (full <-> Hermitian-packed index translation)
//! └── compare   (precision- and magnitude-scaled tolerance checks)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fftcheck::prelude::*;
//!
//! let engine = MixedRadixFft3d::new();
//! let cases = case_matrix(Precision::Single);
//! let report = verify_engine(&engine, &cases, 0)?;
//! assert_eq!(report.skipped, 0);
//! ```
//!
//! The `fftcheck` binary sweeps every bundled engine over the full matrix
//! and exits non-zero on the first mismatch.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case;
pub mod compare;
pub mod dtype;
pub mod engine;
pub mod error;
pub mod harness;
pub mod layout;
pub mod oracle;
pub mod resolve;
pub mod stimulus;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::case::{case_matrix, Dims3, TransformCase, TransformKind};
    pub use crate::compare::{base_tolerance, compare_volumes, CheckStage, ComparisonReport};
    pub use crate::dtype::{Complex64, Complex128, ComplexScalar, Precision};
    pub use crate::engine::{
        DeviceGrid, Fft3dEngine, FftDirection, GridPlan, MixedRadixFft3d, StockhamFft3d,
    };
    pub use crate::error::{Error, Result};
    pub use crate::harness::{run_case, verify_engine, CaseOutcome, RunReport};
}

//! Transform engine adapter contract
//!
//! This module defines the capability interface every engine under test
//! implements, and provides the two bundled engines.
//!
//! # Architecture
//!
//! ```text
//! Fft3dEngine (capability contract)
//! ├── legality predicate (which extents the engine can process)
//! ├── supports() (capability check, distinct skip signal)
//! ├── DeviceGrid allocation + blocking bulk transfer
//! └── execute() (blocking forward/inverse between two grids)
//! ```
//!
//! Execution is synchronous from the orchestrator's point of view: an
//! engine may schedule its work asynchronously inside `execute`, but the
//! call returns only after the transform and any device synchronization
//! complete and the output grid is coherent for download. There is no
//! cancellation or timeout; a hung engine stalls the process.

pub mod grid;
pub mod mixed_radix;
pub mod stockham;
mod volume;

pub use grid::DeviceGrid;
pub use mixed_radix::MixedRadixFft3d;
pub use stockham::StockhamFft3d;

use crate::case::{Dims3, TransformCase, TransformKind};
use crate::dtype::Precision;
use crate::error::Result;
use crate::layout;

/// Direction of a transform execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftDirection {
    /// Spatial domain -> frequency domain
    Forward,
    /// Frequency domain -> spatial domain (unnormalized)
    Inverse,
}

/// Execution descriptor handed to an engine
///
/// Extents are always normalized for the executing engine before a plan
/// is built; an engine never sees a raw requested shape.
#[derive(Debug, Clone, Copy)]
pub struct GridPlan {
    /// Normalized volume extents
    pub dims: Dims3,
    /// Transform kind
    pub kind: TransformKind,
    /// Element precision of both grids
    pub precision: Precision,
}

impl GridPlan {
    /// Build the plan for a normalized case
    pub fn for_case(case: &TransformCase) -> Self {
        Self {
            dims: case.dims,
            kind: case.kind,
            precision: case.precision,
        }
    }

    /// Element count of the spatial grid
    pub fn spatial_len(&self) -> usize {
        self.dims.volume()
    }

    /// Element width of the spatial grid in bytes
    ///
    /// Real-to-complex cases hold a real spatial volume; everything else
    /// holds interleaved complex samples.
    pub fn spatial_elem_bytes(&self) -> usize {
        match self.kind {
            TransformKind::ComplexToComplex => self.precision.complex_bytes(),
            TransformKind::RealToComplex => self.precision.real_bytes(),
        }
    }

    /// Element count of the spectrum grid (packed for real cases)
    pub fn spectrum_len(&self) -> usize {
        layout::packed_len(self.dims, self.kind)
    }

    /// Element width of the spectrum grid in bytes
    pub fn spectrum_elem_bytes(&self) -> usize {
        self.precision.complex_bytes()
    }
}

/// Capability contract for a 3D FFT engine under test
///
/// The orchestrator drives every engine through this interface alone, so
/// identical test bodies run against interchangeable engines. The grid
/// methods have host-emulated default implementations; an engine backed
/// by a real device overrides them with its own allocator and transfers.
pub trait Fft3dEngine {
    /// Human-readable engine name
    fn name(&self) -> &'static str;

    /// True if the engine can process a volume extent of `n`
    fn is_legal_dimension(&self, n: usize) -> bool;

    /// Capability check for a normalized case
    ///
    /// Returns the unsupported-case signal (`Error::UnsupportedCase`) when
    /// the case is valid but beyond this engine's limits; the orchestrator
    /// skips such cases instead of failing the run.
    fn supports(&self, case: &TransformCase) -> Result<()>;

    /// Allocate an accelerator-resident grid of `numel` x `elem_bytes`
    fn allocate_grid(&self, numel: usize, elem_bytes: usize) -> Result<DeviceGrid> {
        DeviceGrid::allocate(numel, elem_bytes)
    }

    /// Blocking host-to-device transfer
    fn upload(&self, host: &[u8], grid: &mut DeviceGrid) -> Result<()> {
        grid.upload(host)
    }

    /// Blocking device-to-host transfer
    fn download(&self, grid: &DeviceGrid, host: &mut [u8]) -> Result<()> {
        grid.download(host)
    }

    /// Execute one transform between two grids, blocking until complete
    ///
    /// Forward reads the spatial grid and fills the spectrum grid;
    /// inverse reads the spectrum grid and fills the spatial grid. The
    /// inverse is unnormalized: a round trip yields `volume * input`.
    fn execute(
        &self,
        plan: &GridPlan,
        direction: FftDirection,
        input: &DeviceGrid,
        output: &mut DeviceGrid,
    ) -> Result<()>;
}

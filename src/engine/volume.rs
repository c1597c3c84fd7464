//! Shared 3D sweep plumbing for the bundled engines
//!
//! Both bundled engines differ only in their 1D row kernel; everything
//! around it - the axis sweep, Hermitian packing of real transforms, and
//! grid I/O - is common and lives here. The sweep transforms the
//! contiguous last axis and rotates the layout `(x, y, z) -> (y, z, x)`
//! between passes, so every axis is processed with unit-stride rows.
//!
//! Real-to-complex rows are produced by a full complex transform followed
//! by truncation to the leading `z/2 + 1` bins, which is valid for odd
//! and even extents alike. The inverse first undoes the x and y passes on
//! the packed grid; the per-row z spectra are then Hermitian again and
//! can be completed by conjugate symmetry before the final inverse pass.

use crate::case::{Dims3, TransformKind};
use crate::dtype::ComplexScalar;
use crate::engine::{DeviceGrid, FftDirection, GridPlan};
use crate::error::{Error, Result};
use crate::layout;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// 1D unnormalized transform kernel, the only per-engine piece
pub(crate) trait RowKernel<C: ComplexScalar>: Sync {
    /// Transform `src` into `dst`; both have the same length
    fn transform(&self, src: &[C], dst: &mut [C], inverse: bool);
}

/// Run one execution of `plan` with `kernel`, reading and writing grids
pub(crate) fn execute_with_kernel<C, K>(
    plan: &GridPlan,
    direction: FftDirection,
    input: &DeviceGrid,
    output: &mut DeviceGrid,
    kernel: &K,
) -> Result<()>
where
    C: ComplexScalar,
    K: RowKernel<C>,
{
    match (plan.kind, direction) {
        (TransformKind::ComplexToComplex, _) => {
            let src: &[C] = input.as_slice();
            expect_len(src.len(), plan.spatial_len())?;
            let inverse = direction == FftDirection::Inverse;
            let result = c2c_3d(src, plan.dims, inverse, kernel);
            output.upload(bytemuck::cast_slice(&result))
        }
        (TransformKind::RealToComplex, FftDirection::Forward) => {
            let src: &[C::Real] = input.as_slice();
            expect_len(src.len(), plan.spatial_len())?;
            let result = r2c_3d::<C, K>(src, plan.dims, kernel);
            output.upload(bytemuck::cast_slice(&result))
        }
        (TransformKind::RealToComplex, FftDirection::Inverse) => {
            let src: &[C] = input.as_slice();
            expect_len(src.len(), plan.spectrum_len())?;
            let result = c2r_3d(src, plan.dims, kernel);
            output.upload(bytemuck::cast_slice(&result))
        }
    }
}

/// Dense complex 3D transform, unnormalized
pub(crate) fn c2c_3d<C, K>(input: &[C], dims: Dims3, inverse: bool, kernel: &K) -> Vec<C>
where
    C: ComplexScalar,
    K: RowKernel<C>,
{
    let mut data = input.to_vec();
    let mut extents = dims.as_array();
    for _ in 0..3 {
        transform_rows(&mut data, extents[2], inverse, kernel);
        (data, extents) = rotate_axes(&data, extents);
    }
    data
}

/// Real forward transform into the packed spectrum grid
pub(crate) fn r2c_3d<C, K>(real: &[C::Real], dims: Dims3, kernel: &K) -> Vec<C>
where
    C: ComplexScalar,
    K: RowKernel<C>,
{
    let z = dims.z;
    let zp = layout::packed_z(z, TransformKind::RealToComplex);
    let rows = dims.x * dims.y;
    let mut packed = vec![C::ZERO; rows * zp];

    let pack_row = |(row_idx, out_row): (usize, &mut [C])| {
        let embedded: Vec<C> = real[row_idx * z..(row_idx + 1) * z]
            .iter()
            .map(|&r| C::from_real(r))
            .collect();
        let mut spectrum = vec![C::ZERO; z];
        kernel.transform(&embedded, &mut spectrum, false);
        out_row.copy_from_slice(&spectrum[..zp]);
    };

    #[cfg(feature = "rayon")]
    packed.par_chunks_mut(zp).enumerate().for_each(pack_row);
    #[cfg(not(feature = "rayon"))]
    packed.chunks_mut(zp).enumerate().for_each(pack_row);

    // x and y passes run on the packed grid; truncation along z commutes
    // with transforms over the other axes.
    let mut extents = [dims.x, dims.y, zp];
    let mut data = packed;
    for _ in 0..2 {
        (data, extents) = rotate_axes(&data, extents);
        transform_rows(&mut data, extents[2], false, kernel);
    }
    let (data, _) = rotate_axes(&data, extents);
    data
}

/// Inverse of [`r2c_3d`], unnormalized, back to a real spatial volume
pub(crate) fn c2r_3d<C, K>(packed: &[C], dims: Dims3, kernel: &K) -> Vec<C::Real>
where
    C: ComplexScalar,
    K: RowKernel<C>,
{
    let z = dims.z;
    let zp = layout::packed_z(z, TransformKind::RealToComplex);
    let rows = dims.x * dims.y;

    // Undo the x and y passes first; per-row z spectra are Hermitian
    // after that.
    let mut extents = [dims.x, dims.y, zp];
    let mut data = packed.to_vec();
    for _ in 0..2 {
        (data, extents) = rotate_axes(&data, extents);
        transform_rows(&mut data, extents[2], true, kernel);
    }
    let (data, _) = rotate_axes(&data, extents);

    let mut out = vec![C::real_from_f64(0.0); rows * z];
    let unpack_row = |(row_idx, out_row): (usize, &mut [C::Real])| {
        let stored = &data[row_idx * zp..(row_idx + 1) * zp];
        let mut full = vec![C::ZERO; z];
        full[..zp].copy_from_slice(stored);
        for k in zp..z {
            full[k] = full[z - k].conjugate();
        }
        let mut spatial = vec![C::ZERO; z];
        kernel.transform(&full, &mut spatial, true);
        for (slot, value) in out_row.iter_mut().zip(&spatial) {
            *slot = value.real_part();
        }
    };

    #[cfg(feature = "rayon")]
    out.par_chunks_mut(z).enumerate().for_each(unpack_row);
    #[cfg(not(feature = "rayon"))]
    out.chunks_mut(z).enumerate().for_each(unpack_row);

    out
}

/// Transform every contiguous row of length `n` in place
fn transform_rows<C, K>(data: &mut [C], n: usize, inverse: bool, kernel: &K)
where
    C: ComplexScalar,
    K: RowKernel<C>,
{
    if n <= 1 {
        return;
    }
    debug_assert_eq!(data.len() % n, 0);

    let run = |row: &mut [C]| {
        let src = row.to_vec();
        kernel.transform(&src, row, inverse);
    };

    #[cfg(feature = "rayon")]
    data.par_chunks_mut(n).for_each(run);
    #[cfg(not(feature = "rayon"))]
    data.chunks_mut(n).for_each(run);
}

/// Rotate layout (a, b, c) -> (b, c, a); three applications are identity
fn rotate_axes<C: ComplexScalar>(data: &[C], extents: [usize; 3]) -> (Vec<C>, [usize; 3]) {
    let [a, b, c] = extents;
    let mut out = vec![C::ZERO; data.len()];
    for ai in 0..a {
        for bi in 0..b {
            for ci in 0..c {
                out[bi * (c * a) + ci * a + ai] = data[ai * (b * c) + bi * c + ci];
            }
        }
    }
    (out, [b, c, a])
}

fn expect_len(actual: usize, expected: usize) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(Error::Internal(format!(
            "grid holds {actual} elements where the plan expects {expected}"
        )))
    }
}

//! Radix-2 Stockham autosort engine
//!
//! The Stockham algorithm avoids Cooley-Tukey's bit-reversal permutation
//! and keeps sequential access patterns, the same structure accelerator
//! kernels use. The trade-off is legality: every extent must be a power
//! of two, so the dimension resolver rounds requested shapes up before
//! this engine sees them.

use crate::case::TransformCase;
use crate::dtype::{Complex64, Complex128, ComplexScalar, Precision};
use crate::engine::volume::{self, RowKernel};
use crate::engine::{DeviceGrid, Fft3dEngine, FftDirection, GridPlan};
use crate::error::{Error, Result};
use std::f64::consts::PI;

/// Largest spatial volume the engine accepts, in elements
const MAX_GRID_ELEMENTS: usize = 1 << 27;

/// 3D FFT engine built on radix-2 Stockham row transforms
#[derive(Debug, Default)]
pub struct StockhamFft3d;

impl StockhamFft3d {
    /// Create the engine
    pub fn new() -> Self {
        Self
    }
}

impl Fft3dEngine for StockhamFft3d {
    fn name(&self) -> &'static str {
        "stockham-radix2"
    }

    fn is_legal_dimension(&self, n: usize) -> bool {
        n.is_power_of_two()
    }

    fn supports(&self, case: &TransformCase) -> Result<()> {
        if case.dims.volume() > MAX_GRID_ELEMENTS {
            return Err(Error::unsupported_case(
                self.name(),
                format!(
                    "volume {} exceeds the {} element grid limit",
                    case.dims, MAX_GRID_ELEMENTS
                ),
            ));
        }
        Ok(())
    }

    fn execute(
        &self,
        plan: &GridPlan,
        direction: FftDirection,
        input: &DeviceGrid,
        output: &mut DeviceGrid,
    ) -> Result<()> {
        match plan.precision {
            Precision::Single => volume::execute_with_kernel::<Complex64, _>(
                plan,
                direction,
                input,
                output,
                &StockhamKernel,
            ),
            Precision::Double => volume::execute_with_kernel::<Complex128, _>(
                plan,
                direction,
                input,
                output,
                &StockhamKernel,
            ),
        }
    }
}

/// Row kernel: radix-2 Stockham with double buffering
///
/// ```text
/// For each stage s = 0..log2(N):
///     half_m = 2^s
///     m = 2^(s+1)
///     For each group g = 0..(N/m):
///         For each butterfly b = 0..half_m:
///             twiddle = exp(sign * 2πi * b / m)
///             even = src[g * half_m + b]
///             odd = src[N/2 + g * half_m + b] * twiddle
///             dst[g * m + b] = even + odd
///             dst[g * m + b + half_m] = even - odd
///     swap(src, dst)
/// ```
struct StockhamKernel;

impl<C: ComplexScalar> RowKernel<C> for StockhamKernel {
    fn transform(&self, src: &[C], dst: &mut [C], inverse: bool) {
        let n = src.len();
        debug_assert!(n.is_power_of_two(), "row length must be a power of two");
        debug_assert_eq!(src.len(), dst.len());

        if n == 1 {
            dst[0] = src[0];
            return;
        }

        let log_n = n.trailing_zeros() as usize;
        let sign = if inverse { 1.0f64 } else { -1.0f64 };

        let mut buf_a: Vec<C> = src.to_vec();
        let mut buf_b: Vec<C> = vec![C::ZERO; n];
        let mut from = &mut buf_a;
        let mut to = &mut buf_b;

        for stage in 0..log_n {
            let m = 1usize << (stage + 1);
            let half_m = 1usize << stage;
            let groups = n / m;

            for g in 0..groups {
                for b in 0..half_m {
                    // Twiddles are formed in f64 and narrowed, keeping
                    // rounding behavior identical across precisions.
                    let theta = sign * 2.0 * PI * (b as f64) / (m as f64);
                    let twiddle = C::from_f64_parts(theta.cos(), theta.sin());

                    let even = from[g * half_m + b];
                    let odd = from[n / 2 + g * half_m + b] * twiddle;

                    to[g * m + b] = even + odd;
                    to[g * m + b + half_m] = even - odd;
                }
            }

            std::mem::swap(&mut from, &mut to);
        }

        dst.copy_from_slice(from.as_slice());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{Dims3, TransformKind};

    #[test]
    fn legal_dimensions_are_powers_of_two() {
        let engine = StockhamFft3d::new();
        assert!(engine.is_legal_dimension(1));
        assert!(engine.is_legal_dimension(64));
        assert!(!engine.is_legal_dimension(0));
        assert!(!engine.is_legal_dimension(28));
        assert!(!engine.is_legal_dimension(96));
    }

    #[test]
    fn oversized_volume_is_an_unsupported_case() {
        let engine = StockhamFft3d::new();
        let case = TransformCase::new(
            Dims3::new(1024, 1024, 1024),
            TransformKind::ComplexToComplex,
            Precision::Single,
        );
        let err = engine.supports(&case).unwrap_err();
        assert!(err.is_unsupported_case());

        let small = TransformCase::new(
            Dims3::new(8, 8, 8),
            TransformKind::RealToComplex,
            Precision::Double,
        );
        assert!(engine.supports(&small).is_ok());
    }

    #[test]
    fn kernel_matches_the_four_point_transform() {
        let src: Vec<Complex128> = (1..=4).map(|v| Complex128::new(v as f64, 0.0)).collect();
        let mut dst = vec![Complex128::ZERO; 4];
        StockhamKernel.transform(&src, &mut dst, false);

        let expected = [
            Complex128::new(10.0, 0.0),
            Complex128::new(-2.0, 2.0),
            Complex128::new(-2.0, 0.0),
            Complex128::new(-2.0, -2.0),
        ];
        for (a, b) in dst.iter().zip(&expected) {
            assert!((a.re - b.re).abs() < 1e-12 && (a.im - b.im).abs() < 1e-12);
        }
    }
}

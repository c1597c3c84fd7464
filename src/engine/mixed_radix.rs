//! Mixed-radix Cooley-Tukey engine
//!
//! Handles every extent whose prime factors lie in {2, 3, 5, 7}, the
//! legality set accelerator FFT libraries typically advertise. Irregular
//! shapes like 21x25x27 or 49x98x14 run here unchanged, where the radix-2
//! engine would have rounded them up.

use crate::case::TransformCase;
use crate::dtype::{Complex64, Complex128, ComplexScalar, Precision};
use crate::engine::volume::{self, RowKernel};
use crate::engine::{DeviceGrid, Fft3dEngine, FftDirection, GridPlan};
use crate::error::{Error, Result};
use std::f64::consts::PI;

/// Prime radices with dedicated decomposition stages
const RADICES: [usize; 4] = [2, 3, 5, 7];

/// Largest spatial volume the engine accepts, in elements
const MAX_GRID_ELEMENTS: usize = 1 << 27;

/// 3D FFT engine built on recursive mixed-radix row transforms
#[derive(Debug, Default)]
pub struct MixedRadixFft3d;

impl MixedRadixFft3d {
    /// Create the engine
    pub fn new() -> Self {
        Self
    }
}

impl Fft3dEngine for MixedRadixFft3d {
    fn name(&self) -> &'static str {
        "mixed-radix"
    }

    fn is_legal_dimension(&self, n: usize) -> bool {
        if n == 0 {
            return false;
        }
        let mut rest = n;
        for p in RADICES {
            while rest % p == 0 {
                rest /= p;
            }
        }
        rest == 1
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
                &MixedRadixKernel,
            ),
            Precision::Double => volume::execute_with_kernel::<Complex128, _>(
                plan,
                direction,
                input,
                output,
                &MixedRadixKernel,
            ),
        }
    }
}

/// Row kernel: recursive decimation-in-time over the radix set
///
/// For n = p * m the input is split into p stride-decimated subsequences,
/// each transformed recursively, then recombined with
/// `X[k] = sum_q W_n^(k*q) * Xq[k mod m]`. A factor outside the radix set
/// falls through to a direct DFT stage, so the kernel stays correct even
/// for rows legality never admits.
struct MixedRadixKernel;

impl<C: ComplexScalar> RowKernel<C> for MixedRadixKernel {
    fn transform(&self, src: &[C], dst: &mut [C], inverse: bool) {
        debug_assert_eq!(src.len(), dst.len());
        let sign = if inverse { 1.0f64 } else { -1.0f64 };
        fft_recursive(src, 1, dst, src.len(), sign);
    }
}

/// Transform `n` elements of `src` taken at `stride` into `dst`
fn fft_recursive<C: ComplexScalar>(src: &[C], stride: usize, dst: &mut [C], n: usize, sign: f64) {
    if n == 1 {
        dst[0] = src[0];
        return;
    }

    let p = smallest_radix(n);
    let m = n / p;

    // Sub-transforms of the p decimated sequences, packed side by side.
    let mut sub = vec![C::ZERO; n];
    for q in 0..p {
        fft_recursive(&src[q * stride..], stride * p, &mut sub[q * m..(q + 1) * m], m, sign);
    }

    for (k, out) in dst.iter_mut().take(n).enumerate() {
        let km = k % m;
        let mut acc = C::ZERO;
        for q in 0..p {
            // Reduce k*q mod n before forming the angle.
            let turns = ((k * q) % n) as f64 / n as f64;
            let theta = sign * 2.0 * PI * turns;
            let twiddle = C::from_f64_parts(theta.cos(), theta.sin());
            acc = acc + sub[q * m + km] * twiddle;
        }
        *out = acc;
    }
}

/// Smallest radix dividing `n`, or `n` itself for out-of-set factors
fn smallest_radix(n: usize) -> usize {
    for p in RADICES {
        if n % p == 0 {
            return p;
        }
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::Dims3;
    use crate::engine::FftDirection;
    use crate::{oracle, stimulus};

    #[test]
    fn legality_is_smoothness_over_the_radix_set() {
        let engine = MixedRadixFft3d::new();
        for n in [1, 2, 21, 25, 27, 28, 30, 49, 98, 120, 243, 216] {
            assert!(engine.is_legal_dimension(n), "{n} should be legal");
        }
        for n in [0, 11, 13, 22, 26, 31, 97] {
            assert!(!engine.is_legal_dimension(n), "{n} should be illegal");
        }
    }

    #[test]
    fn kernel_matches_oracle_for_smooth_and_prime_lengths() {
        // 12 = 2^2*3 exercises the recursion; 11 exercises the direct
        // DFT fallback stage.
        for n in [12usize, 11] {
            let input = stimulus::complex_volume(3, n);
            let mut dst = vec![Complex128::ZERO; n];
            MixedRadixKernel.transform(&input, &mut dst, false);

            let reference = oracle::dft_3d(&input, Dims3::new(1, 1, n), FftDirection::Forward);
            for (a, b) in dst.iter().zip(&reference) {
                assert!(
                    (a.re - b.re).abs() < 1e-10 && (a.im - b.im).abs() < 1e-10,
                    "n={n}: {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn kernel_roundtrip_is_volume_scaled_identity() {
        let n = 30;
        let input = stimulus::complex_volume(8, n);
        let mut spectrum = vec![Complex128::ZERO; n];
        MixedRadixKernel.transform(&input, &mut spectrum, false);
        let mut back = vec![Complex128::ZERO; n];
        MixedRadixKernel.transform(&spectrum, &mut back, true);

        for (&original, &recovered) in input.iter().zip(&back) {
            assert!((recovered.re / n as f64 - original.re).abs() < 1e-12);
            assert!((recovered.im / n as f64 - original.im).abs() < 1e-12);
        }
    }
}

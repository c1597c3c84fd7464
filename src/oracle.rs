//! Reference oracle: 3D DFT computed from the definition
//!
//! Ground truth for every comparison. Each axis is transformed with the
//! O(n²) discrete Fourier sum, evaluated in f64 host memory with twiddles
//! taken straight from `exp(±2πi·k·t/n)`. The oracle shares no code with
//! the engines under test and is never itself subject to a pass/fail
//! check.
//!
//! Both directions are unnormalized: `inverse(forward(x)) = volume · x`,
//! the convention accelerator FFT libraries expose. Callers apply the
//! `1/volume` rescale themselves.
//!
//! # Axis sweep
//!
//! The volume is transformed one axis at a time. Each pass transforms the
//! contiguous last axis, then rotates the layout `(x, y, z) -> (y, z, x)`;
//! after three passes every axis has been transformed and the layout is
//! back in (x, y, z) order.

use crate::case::Dims3;
use crate::dtype::Complex128;
use crate::engine::FftDirection;
use std::f64::consts::PI;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// 3D DFT of a dense complex volume, unnormalized
///
/// # Panics
///
/// Panics if `input.len() != dims.volume()`; the harness sizes stimulus
/// volumes before calling in.
pub fn dft_3d(input: &[Complex128], dims: Dims3, direction: FftDirection) -> Vec<Complex128> {
    assert_eq!(
        input.len(),
        dims.volume(),
        "oracle input length does not match {dims}"
    );

    let sign = match direction {
        FftDirection::Forward => -1.0,
        FftDirection::Inverse => 1.0,
    };

    let mut data = input.to_vec();
    let mut extents = dims.as_array();
    for _ in 0..3 {
        dft_rows(&mut data, extents[2], sign);
        (data, extents) = rotate_axes(&data, extents);
    }
    data
}

/// Transform every contiguous row of length `n` in place
fn dft_rows(data: &mut [Complex128], n: usize, sign: f64) {
    debug_assert_eq!(data.len() % n.max(1), 0);

    #[cfg(feature = "rayon")]
    data.par_chunks_mut(n).for_each(|row| dft_row(row, sign));

    #[cfg(not(feature = "rayon"))]
    data.chunks_mut(n).for_each(|row| dft_row(row, sign));
}

/// One naive DFT, straight from the definition
fn dft_row(row: &mut [Complex128], sign: f64) {
    let n = row.len();
    if n <= 1 {
        return;
    }

    let src = row.to_vec();
    for (k, out) in row.iter_mut().enumerate() {
        let mut acc = Complex128::ZERO;
        for (t, &value) in src.iter().enumerate() {
            // Reduce k*t mod n before forming the angle; the raw product
            // loses low bits for long rows.
            let turns = ((k * t) % n) as f64 / n as f64;
            let theta = sign * 2.0 * PI * turns;
            acc = acc + value * Complex128::new(theta.cos(), theta.sin());
        }
        *out = acc;
    }
}

/// Rotate layout (a, b, c) -> (b, c, a)
///
/// `out[(bi, ci, ai)] = in[(ai, bi, ci)]`; applying this three times is
/// the identity, which is what lets the sweep transform only the last
/// axis.
fn rotate_axes(data: &[Complex128], extents: [usize; 3]) -> (Vec<Complex128>, [usize; 3]) {
    let [a, b, c] = extents;
    let mut out = vec![Complex128::ZERO; data.len()];
    for ai in 0..a {
        for bi in 0..b {
            for ci in 0..c {
                out[bi * (c * a) + ci * a + ai] = data[ai * (b * c) + bi * c + ci];
            }
        }
    }
    (out, [b, c, a])
}

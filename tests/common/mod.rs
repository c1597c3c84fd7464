//! Common test utilities
#![allow(dead_code)]

use fftcheck::prelude::*;
use fftcheck::stimulus;

/// Assert two complex f64 slices agree within `tol * max(1, |expected|)`
/// per component, the same error measure the harness comparator uses.
pub fn assert_complex_close(expected: &[Complex128], found: &[Complex128], tol: f64, msg: &str) {
    assert_eq!(expected.len(), found.len(), "{}: length mismatch", msg);
    for (i, (e, f)) in expected.iter().zip(found.iter()).enumerate() {
        for (le, lf, part) in [(e.re, f.re, "re"), (e.im, f.im, "im")] {
            let diff = (le - lf).abs();
            let bound = tol * le.abs().max(1.0);
            assert!(
                diff <= bound,
                "{}: element {} {} differs: {} vs {} (diff={:.3e}, tol={:.3e})",
                msg,
                i,
                part,
                le,
                lf,
                diff,
                bound
            );
        }
    }
}

/// Seeded real volume: the real components of the complex stimulus
pub fn real_stimulus(seed: u64, len: usize) -> Vec<f64> {
    stimulus::complex_volume(seed, len)
        .iter()
        .map(|s| s.re)
        .collect()
}

/// Drive one double-precision forward transform through the adapter
/// contract and return the downloaded spectrum.
pub fn forward_spectrum_f64(
    engine: &dyn Fft3dEngine,
    dims: Dims3,
    kind: TransformKind,
    seed: u64,
) -> Vec<Complex128> {
    let case = TransformCase::new(dims, kind, Precision::Double);
    let plan = GridPlan::for_case(&case);

    let mut spatial = engine
        .allocate_grid(plan.spatial_len(), plan.spatial_elem_bytes())
        .unwrap();
    let mut spectrum = engine
        .allocate_grid(plan.spectrum_len(), plan.spectrum_elem_bytes())
        .unwrap();

    match kind {
        TransformKind::ComplexToComplex => {
            let host = stimulus::complex_volume(seed, dims.volume());
            engine
                .upload(bytemuck::cast_slice(&host), &mut spatial)
                .unwrap();
        }
        TransformKind::RealToComplex => {
            let host = real_stimulus(seed, dims.volume());
            engine
                .upload(bytemuck::cast_slice(&host), &mut spatial)
                .unwrap();
        }
    }

    engine
        .execute(&plan, FftDirection::Forward, &spatial, &mut spectrum)
        .unwrap();

    let mut out = vec![Complex128::ZERO; plan.spectrum_len()];
    engine
        .download(&spectrum, bytemuck::cast_slice_mut(&mut out))
        .unwrap();
    out
}

/// Forward then inverse through the adapter contract; returns the
/// unnormalized recovered spatial volume as complex samples.
pub fn roundtrip_f64(
    engine: &dyn Fft3dEngine,
    dims: Dims3,
    kind: TransformKind,
    seed: u64,
) -> Vec<Complex128> {
    let case = TransformCase::new(dims, kind, Precision::Double);
    let plan = GridPlan::for_case(&case);

    let mut spatial = engine
        .allocate_grid(plan.spatial_len(), plan.spatial_elem_bytes())
        .unwrap();
    let mut spectrum = engine
        .allocate_grid(plan.spectrum_len(), plan.spectrum_elem_bytes())
        .unwrap();

    match kind {
        TransformKind::ComplexToComplex => {
            let host = stimulus::complex_volume(seed, dims.volume());
            engine
                .upload(bytemuck::cast_slice(&host), &mut spatial)
                .unwrap();
        }
        TransformKind::RealToComplex => {
            let host = real_stimulus(seed, dims.volume());
            engine
                .upload(bytemuck::cast_slice(&host), &mut spatial)
                .unwrap();
        }
    }

    engine
        .execute(&plan, FftDirection::Forward, &spatial, &mut spectrum)
        .unwrap();
    engine
        .execute(&plan, FftDirection::Inverse, &spectrum, &mut spatial)
        .unwrap();

    match kind {
        TransformKind::ComplexToComplex => {
            let mut out = vec![Complex128::ZERO; plan.spatial_len()];
            engine
                .download(&spatial, bytemuck::cast_slice_mut(&mut out))
                .unwrap();
            out
        }
        TransformKind::RealToComplex => {
            let mut out = vec![0.0f64; plan.spatial_len()];
            engine
                .download(&spatial, bytemuck::cast_slice_mut(&mut out))
                .unwrap();
            out.iter().map(|&r| Complex128::new(r, 0.0)).collect()
        }
    }
}

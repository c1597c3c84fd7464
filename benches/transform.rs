//! Engine and oracle throughput baselines
//!
//! Not part of verification; tracks how much of a sweep's wall time the
//! naive oracle costs relative to the engines it judges.

use criterion::{criterion_group, criterion_main, Criterion};
use fftcheck::prelude::*;
use fftcheck::{oracle, stimulus};

fn bench_engine_forward(c: &mut Criterion) {
    let engine = MixedRadixFft3d::new();
    let dims = Dims3::new(28, 25, 30);
    let case = TransformCase::new(dims, TransformKind::ComplexToComplex, Precision::Double);
    let plan = GridPlan::for_case(&case);

    let host = stimulus::complex_volume(0, dims.volume());
    let mut spatial = engine
        .allocate_grid(plan.spatial_len(), plan.spatial_elem_bytes())
        .unwrap();
    let mut spectrum = engine
        .allocate_grid(plan.spectrum_len(), plan.spectrum_elem_bytes())
        .unwrap();
    engine
        .upload(bytemuck::cast_slice(&host), &mut spatial)
        .unwrap();

    c.bench_function("mixed_radix_forward_28x25x30", |b| {
        b.iter(|| {
            engine
                .execute(&plan, FftDirection::Forward, &spatial, &mut spectrum)
                .unwrap()
        })
    });
}

fn bench_oracle_forward(c: &mut Criterion) {
    let dims = Dims3::new(16, 16, 16);
    let input = stimulus::complex_volume(0, dims.volume());

    c.bench_function("oracle_forward_16x16x16", |b| {
        b.iter(|| oracle::dft_3d(&input, dims, FftDirection::Forward))
    });
}

criterion_group!(benches, bench_engine_forward, bench_oracle_forward);
criterion_main!(benches);

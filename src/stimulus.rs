//! Deterministic pseudorandom stimulus volumes
//!
//! The harness is a deterministic verifier: the same seed must produce the
//! same stimulus, so failures reproduce run-to-run. Samples are complex
//! with real and imaginary parts independently uniform in [0, 1). Packing
//! for real-to-complex cases is applied downstream, never here.

use crate::dtype::Complex128;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate `count` complex samples from `seed`
///
/// The master stimulus is always f64; per-case narrowing to the engine's
/// precision happens at upload time.
pub fn complex_volume(seed: u64, count: usize) -> Vec<Complex128> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Complex128::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect()
}

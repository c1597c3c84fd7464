//! Full-volume <-> packed spectrum layout translation
//!
//! Real-to-complex output exhibits Hermitian symmetry, so engines store
//! only the non-redundant last-axis half: `Zp = z/2 + 1` samples per
//! (x, y) row. The oracle always produces the dense full volume. Every
//! piece of packing-offset arithmetic in the harness lives here; getting
//! an offset wrong anywhere else would silently compare the wrong
//! elements.
//!
//! Index conventions (row-major, z fastest):
//!
//! ```text
//! full:   x*Y*Z  + y*Z  + z
//! packed: x*Y*Zp + y*Zp + z     with z < Zp
//! ```

use crate::case::{Dims3, TransformKind};
use crate::dtype::Complex128;

/// Stored last-axis extent for a transform kind
pub fn packed_z(z: usize, kind: TransformKind) -> usize {
    match kind {
        TransformKind::ComplexToComplex => z,
        TransformKind::RealToComplex => z / 2 + 1,
    }
}

/// Extents of the stored spectrum grid
pub fn packed_dims(dims: Dims3, kind: TransformKind) -> Dims3 {
    Dims3::new(dims.x, dims.y, packed_z(dims.z, kind))
}

/// Element count of the stored spectrum grid
pub fn packed_len(dims: Dims3, kind: TransformKind) -> usize {
    packed_dims(dims, kind).volume()
}

/// Flat index into the dense full volume
#[inline]
pub fn full_index(dims: Dims3, x: usize, y: usize, z: usize) -> usize {
    x * dims.y * dims.z + y * dims.z + z
}

/// Flat index into the packed spectrum grid
#[inline]
pub fn packed_index(dims: Dims3, kind: TransformKind, x: usize, y: usize, z: usize) -> usize {
    let zp = packed_z(dims.z, kind);
    debug_assert!(z < zp);
    x * dims.y * zp + y * zp + z
}

/// Gather the non-redundant elements of a full spectrum into packed order
///
/// The result is directly comparable, element for element, with an
/// engine's packed output.
pub fn select_packed(full: &[Complex128], dims: Dims3, kind: TransformKind) -> Vec<Complex128> {
    debug_assert_eq!(full.len(), dims.volume());
    let zp = packed_z(dims.z, kind);

    let mut packed = Vec::with_capacity(dims.x * dims.y * zp);
    for x in 0..dims.x {
        for y in 0..dims.y {
            for z in 0..zp {
                packed.push(full[full_index(dims, x, y, z)]);
            }
        }
    }
    packed
}

/// Reconstruct the dense full spectrum from a packed half
///
/// The omitted element at (x, y, z) with z >= Zp is the conjugate of the
/// element at ((X-x) mod X, (Y-y) mod Y, Z-z), which always falls inside
/// the packed range. For complex-to-complex the packed grid already is
/// the full grid.
pub fn unpack_full(packed: &[Complex128], dims: Dims3, kind: TransformKind) -> Vec<Complex128> {
    debug_assert_eq!(packed.len(), packed_len(dims, kind));
    let zp = packed_z(dims.z, kind);
    if zp == dims.z {
        return packed.to_vec();
    }

    let mut full = vec![Complex128::ZERO; dims.volume()];
    for x in 0..dims.x {
        for y in 0..dims.y {
            for z in 0..dims.z {
                full[full_index(dims, x, y, z)] = if z < zp {
                    packed[packed_index(dims, kind, x, y, z)]
                } else {
                    let mx = (dims.x - x) % dims.x;
                    let my = (dims.y - y) % dims.y;
                    let mz = dims.z - z;
                    packed[packed_index(dims, kind, mx, my, mz)].conj()
                };
            }
        }
    }
    full
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::ComplexScalar;
    use crate::engine::FftDirection;
    use crate::{oracle, stimulus};

    #[test]
    fn packed_last_dimension() {
        assert_eq!(packed_z(28, TransformKind::RealToComplex), 15);
        assert_eq!(packed_z(27, TransformKind::RealToComplex), 14);
        assert_eq!(packed_z(30, TransformKind::ComplexToComplex), 30);
    }

    #[test]
    fn packed_length_for_spec_shape() {
        let dims = Dims3::new(25, 25, 28);
        assert_eq!(packed_len(dims, TransformKind::RealToComplex), 25 * 25 * 15);
        assert_eq!(packed_len(dims, TransformKind::ComplexToComplex), dims.volume());
    }

    #[test]
    fn index_translation_examples() {
        let dims = Dims3::new(4, 3, 8);
        // Full stride over z is 8, packed stride is 8/2+1 = 5.
        assert_eq!(full_index(dims, 1, 2, 3), 24 + 16 + 3);
        assert_eq!(packed_index(dims, TransformKind::RealToComplex, 1, 2, 3), 15 + 10 + 3);
    }

    #[test]
    fn select_packed_takes_leading_half_rows() {
        let dims = Dims3::new(2, 2, 4);
        let full: Vec<Complex128> = (0..dims.volume())
            .map(|i| Complex128::new(i as f64, 0.0))
            .collect();

        let packed = select_packed(&full, dims, TransformKind::RealToComplex);
        let re: Vec<f64> = packed.iter().map(|c| c.re).collect();
        assert_eq!(re, &[0.0, 1.0, 2.0, 4.0, 5.0, 6.0, 8.0, 9.0, 10.0, 12.0, 13.0, 14.0]);
    }

    #[test]
    fn conjugate_reconstruction_matches_oracle() {
        // Real input: the full oracle spectrum must be recoverable from
        // its packed half alone, for even and odd last extents.
        for dims in [Dims3::new(4, 3, 6), Dims3::new(3, 4, 5)] {
            let real_input: Vec<Complex128> = stimulus::complex_volume(5, dims.volume())
                .iter()
                .map(|s| Complex128::new(s.re, 0.0))
                .collect();

            let full = oracle::dft_3d(&real_input, dims, FftDirection::Forward);
            let packed = select_packed(&full, dims, TransformKind::RealToComplex);
            let rebuilt = unpack_full(&packed, dims, TransformKind::RealToComplex);

            for (a, b) in full.iter().zip(&rebuilt) {
                assert!(
                    (a.re - b.re).abs() < 1e-9 && (a.im - b.im).abs() < 1e-9,
                    "reconstruction diverged: {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn unpack_full_is_identity_for_complex_cases() {
        let dims = Dims3::new(2, 3, 4);
        let data: Vec<Complex128> = (0..dims.volume())
            .map(|i| Complex128::from_f64_parts(i as f64, -(i as f64)))
            .collect();
        assert_eq!(unpack_full(&data, dims, TransformKind::ComplexToComplex), data);
    }
}

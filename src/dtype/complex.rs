//! Complex number types for transform grids
//!
//! Complex samples are stored in interleaved format (re, im, re, im...),
//! matching the layout FFT libraries and accelerator kernels expect, and
//! are `bytemuck`-compatible so host staging buffers can be viewed as raw
//! bytes for grid transfers without copies.
//!
//! Transform kernels are written once, generic over [`ComplexScalar`], and
//! instantiated at both precisions.

use bytemuck::{Pod, Zeroable};
use std::fmt;
use std::ops::{Add, Mul, Sub};

macro_rules! impl_complex {
    ($name:ident, $float:ty, $doc_bits:literal) => {
        #[doc = concat!($doc_bits, "-bit complex number, interleaved `", stringify!($float), "` pair")]
        #[repr(C)]
        #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
        pub struct $name {
            /// Real part
            pub re: $float,
            /// Imaginary part
            pub im: $float,
        }

        impl $name {
            /// Zero complex number
            pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

            /// Create a new complex number
            #[inline]
            pub const fn new(re: $float, im: $float) -> Self {
                Self { re, im }
            }

            /// Complex conjugate: conj(a + bi) = a - bi
            #[inline]
            pub fn conj(self) -> Self {
                Self {
                    re: self.re,
                    im: -self.im,
                }
            }

            /// Magnitude (absolute value): |z| = sqrt(re² + im²)
            #[inline]
            pub fn magnitude(self) -> $float {
                (self.re * self.re + self.im * self.im).sqrt()
            }
        }

        impl Add for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self {
                    re: self.re + rhs.re,
                    im: self.im + rhs.im,
                }
            }
        }

        impl Sub for $name {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self {
                    re: self.re - rhs.re,
                    im: self.im - rhs.im,
                }
            }
        }

        impl Mul for $name {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self {
                    re: self.re * rhs.re - self.im * rhs.im,
                    im: self.re * rhs.im + self.im * rhs.re,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.im >= 0.0 {
                    write!(f, "{}+{}i", self.re, self.im)
                } else {
                    write!(f, "{}{}i", self.re, self.im)
                }
            }
        }

        impl ComplexScalar for $name {
            type Real = $float;

            const ZERO: Self = Self { re: 0.0, im: 0.0 };

            #[inline]
            fn from_f64_parts(re: f64, im: f64) -> Self {
                Self::new(re as $float, im as $float)
            }

            #[inline]
            fn from_real(re: Self::Real) -> Self {
                Self::new(re, 0.0)
            }

            #[inline]
            fn conjugate(self) -> Self {
                self.conj()
            }

            #[inline]
            fn re_f64(self) -> f64 {
                self.re as f64
            }

            #[inline]
            fn im_f64(self) -> f64 {
                self.im as f64
            }

            #[inline]
            fn real_part(self) -> Self::Real {
                self.re
            }

            #[inline]
            fn real_to_f64(value: Self::Real) -> f64 {
                value as f64
            }

            #[inline]
            fn real_from_f64(value: f64) -> Self::Real {
                value as $float
            }
        }
    };
}

impl_complex!(Complex64, f32, "64");
impl_complex!(Complex128, f64, "128");

/// Precision-generic complex element
///
/// Transform kernels and grid plumbing are written against this trait so
/// the same code serves Single (`Complex64`) and Double (`Complex128`)
/// cases. Twiddle factors are always computed in f64 and narrowed through
/// [`ComplexScalar::from_f64_parts`], the same convention the kernels use
/// for both precisions so their rounding behavior stays comparable.
pub trait ComplexScalar:
    Pod
    + Copy
    + Send
    + Sync
    + PartialEq
    + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + 'static
{
    /// Matching real component type
    type Real: Pod + Copy + Send + Sync + PartialEq + fmt::Debug + 'static;

    /// Additive identity
    const ZERO: Self;

    /// Narrow an f64 (re, im) pair into this precision
    fn from_f64_parts(re: f64, im: f64) -> Self;

    /// Embed a real component with zero imaginary part
    fn from_real(re: Self::Real) -> Self;

    /// Complex conjugate
    fn conjugate(self) -> Self;

    /// Real part widened to f64
    fn re_f64(self) -> f64;

    /// Imaginary part widened to f64
    fn im_f64(self) -> f64;

    /// Real part in native width
    fn real_part(self) -> Self::Real;

    /// Widen a real component to f64
    fn real_to_f64(value: Self::Real) -> f64;

    /// Narrow an f64 to the real component type
    fn real_from_f64(value: f64) -> Self::Real;
}

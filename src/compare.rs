//! Tolerance comparator
//!
//! Element-wise comparison of an engine result against the oracle. The
//! error measure divides by `max(1, |expected|)` so large spectral bins
//! are judged relatively and small ones absolutely, and the check never
//! stops at the first bad element: the whole volume is scanned so the
//! report carries aggregate statistics alongside the first and worst
//! offenders.
//!
//! Base tolerances by precision and stage:
//!
//! | Precision | Forward | Round-trip |
//! |-----------|---------|------------|
//! | Single    | 1e-3    | 1e-4       |
//! | Double    | 1e-8    | 1e-9       |
//!
//! The forward check compares raw spectral values, whose magnitudes grow
//! with the volume, so its bound acts relatively. The round-trip check
//! runs after two transform passes and a `1/volume` rescale back to unit
//! range, where the bound acts as an absolute floor over error both
//! passes accumulated. Each case may widen the final tolerance through
//! its `tolerance_scale`.

use crate::dtype::{Complex128, Precision};

/// Which comparison a tolerance applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStage {
    /// Engine forward output vs oracle spectrum
    Forward,
    /// Inverse-of-forward vs original stimulus (after rescale)
    RoundTrip,
}

impl CheckStage {
    /// Display label used in diagnostics
    pub fn label(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::RoundTrip => "round-trip",
        }
    }
}

/// Base tolerance before the per-case scale is applied
pub fn base_tolerance(precision: Precision, stage: CheckStage) -> f64 {
    match (precision, stage) {
        (Precision::Single, CheckStage::Forward) => 1e-3,
        (Precision::Single, CheckStage::RoundTrip) => 1e-4,
        (Precision::Double, CheckStage::Forward) => 1e-8,
        (Precision::Double, CheckStage::RoundTrip) => 1e-9,
    }
}

/// Outcome of comparing one volume
#[derive(Debug, Clone, Copy)]
pub struct ComparisonReport {
    /// Largest raw |expected - found| over both components
    pub max_abs_error: f64,
    /// Largest scaled error over both components
    pub max_rel_error: f64,
    /// Flat index of the element with the largest scaled error
    pub worst_index: usize,
    /// Flat index of the first out-of-tolerance element, if any
    pub first_mismatch: Option<usize>,
    /// Number of out-of-tolerance elements
    pub mismatches: usize,
    /// True when every element is within tolerance
    pub passed: bool,
}

/// Compare two equal-length complex sequences against `tolerance`
///
/// Real and imaginary components are judged separately, each against
/// `tolerance * max(1, |expected component|)`.
///
/// # Panics
///
/// Panics on length mismatch; callers align lengths through the layout
/// translator before comparing.
pub fn compare_volumes(
    expected: &[Complex128],
    found: &[Complex128],
    tolerance: f64,
) -> ComparisonReport {
    assert_eq!(
        expected.len(),
        found.len(),
        "comparator sequences differ in length"
    );

    let mut report = ComparisonReport {
        max_abs_error: 0.0,
        max_rel_error: 0.0,
        worst_index: 0,
        first_mismatch: None,
        mismatches: 0,
        passed: true,
    };

    for (i, (e, f)) in expected.iter().zip(found.iter()).enumerate() {
        let scaled = scaled_error(e.re, f.re).max(scaled_error(e.im, f.im));
        let abs = (e.re - f.re).abs().max((e.im - f.im).abs());

        if abs > report.max_abs_error {
            report.max_abs_error = abs;
        }
        if scaled > report.max_rel_error {
            report.max_rel_error = scaled;
            report.worst_index = i;
        }
        if scaled > tolerance {
            report.mismatches += 1;
            if report.first_mismatch.is_none() {
                report.first_mismatch = Some(i);
            }
        }
    }

    report.passed = report.mismatches == 0;
    report
}

/// |expected - found| / max(1, |expected|)
#[inline]
fn scaled_error(expected: f64, found: f64) -> f64 {
    (expected - found).abs() / expected.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex128 {
        Complex128::new(re, im)
    }

    #[test]
    fn identical_volumes_pass() {
        let data = vec![c(1.0, -2.0), c(100.0, 0.5)];
        let report = compare_volumes(&data, &data, 1e-12);
        assert!(report.passed);
        assert_eq!(report.mismatches, 0);
        assert_eq!(report.max_abs_error, 0.0);
    }

    #[test]
    fn large_magnitudes_are_judged_relatively() {
        // An absolute error of 0.5 on a bin of magnitude 1000 is 5e-4
        // scaled, within a 1e-3 tolerance.
        let expected = vec![c(1000.0, 0.0)];
        let found = vec![c(1000.5, 0.0)];
        assert!(compare_volumes(&expected, &found, 1e-3).passed);

        // The same absolute error on a unit-scale bin is not.
        let expected = vec![c(0.5, 0.0)];
        let found = vec![c(1.0, 0.0)];
        assert!(!compare_volumes(&expected, &found, 1e-3).passed);
    }

    #[test]
    fn scan_covers_the_whole_volume() {
        let expected = vec![c(0.0, 0.0); 5];
        let mut found = expected.clone();
        found[1] = c(0.01, 0.0);
        found[3] = c(0.5, 0.0); // worst
        found[4] = c(0.02, 0.0);

        let report = compare_volumes(&expected, &found, 1e-3);
        assert!(!report.passed);
        assert_eq!(report.mismatches, 3);
        assert_eq!(report.first_mismatch, Some(1));
        assert_eq!(report.worst_index, 3);
        assert!((report.max_abs_error - 0.5).abs() < 1e-15);
    }

    #[test]
    fn imaginary_component_is_checked_too() {
        let expected = vec![c(1.0, 0.0)];
        let found = vec![c(1.0, 0.1)];
        let report = compare_volumes(&expected, &found, 1e-3);
        assert!(!report.passed);
        assert!((report.max_rel_error - 0.1).abs() < 1e-15);
    }

    #[test]
    fn base_tolerances_order() {
        use CheckStage::{Forward, RoundTrip};
        // Single is looser than double at both stages.
        assert!(base_tolerance(Precision::Single, Forward) > base_tolerance(Precision::Double, Forward));
        assert!(
            base_tolerance(Precision::Single, Forward)
                > base_tolerance(Precision::Single, RoundTrip)
        );
    }
}

//! Test orchestrator
//!
//! Drives one engine through the case matrix:
//!
//! ```text
//! SelectCase -> NormalizeShape -> GenerateStimulus -> RunForward
//!     -> CompareForward -> RunInverse -> CompareRoundTrip
//!     -> (Pass | Skip | Fail)
//! ```
//!
//! Exactly one case is in flight at a time and no two engine executions
//! overlap. A case an engine declines through the unsupported-case signal
//! is skipped for that engine only. A comparator rejection is fatal to
//! the whole run: the harness verifies, it does not tolerate, and a
//! deterministic verifier gains nothing from retries.

use crate::case::{TransformCase, TransformKind};
use crate::compare::{self, CheckStage};
use crate::dtype::{Complex64, Complex128, ComplexScalar, Precision};
use crate::engine::{Fft3dEngine, FftDirection, GridPlan};
use crate::error::{Error, Result};
use crate::{layout, oracle, resolve, stimulus};

/// Stimulus seed the CLI runs with
pub const DEFAULT_SEED: u64 = 0;

/// How one case ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseOutcome {
    /// Both checks passed
    Passed,
    /// Engine declined the case; not a failure
    Skipped,
}

/// Tally for one engine's sweep over the matrix
#[derive(Debug, Default, Clone, Copy)]
pub struct RunReport {
    /// Cases that passed both checks
    pub passed: usize,
    /// Cases the engine declined
    pub skipped: usize,
}

/// Run every case of the matrix against one engine
///
/// Prints the engine banner and one line per case. Returns the tally on
/// success; the first comparator rejection or configuration error aborts
/// the sweep.
pub fn verify_engine(
    engine: &dyn Fft3dEngine,
    cases: &[TransformCase],
    seed: u64,
) -> Result<RunReport> {
    println!("Testing {}", engine.name());

    let mut report = RunReport::default();
    for case in cases {
        match run_case(engine, case, seed)? {
            CaseOutcome::Passed => report.passed += 1,
            CaseOutcome::Skipped => report.skipped += 1,
        }
    }
    Ok(report)
}

/// Run a single case against one engine
///
/// The requested shape is normalized for this engine before anything
/// else; stimulus, oracle, and comparisons all use the normalized shape.
pub fn run_case(
    engine: &dyn Fft3dEngine,
    case: &TransformCase,
    seed: u64,
) -> Result<CaseOutcome> {
    let dims = resolve::normalize_dims(engine, case.dims)?;
    let case = case.with_dims(dims);

    if let Err(err) = engine.supports(&case) {
        if err.is_unsupported_case() {
            println!("skipping {} {}: {err}", case.kind.label(), dims);
            return Ok(CaseOutcome::Skipped);
        }
        return Err(err);
    }

    println!("{} {}", case.kind.label(), dims);

    match case.precision {
        Precision::Single => run_case_typed::<Complex64>(engine, &case, seed),
        Precision::Double => run_case_typed::<Complex128>(engine, &case, seed),
    }
}

/// The case body, monomorphized per precision
fn run_case_typed<C: ComplexScalar>(
    engine: &dyn Fft3dEngine,
    case: &TransformCase,
    seed: u64,
) -> Result<CaseOutcome> {
    let dims = case.dims;
    let volume = dims.volume();
    let plan = GridPlan::for_case(case);

    // The master stimulus stays f64; the engine works on a narrowed copy.
    let master = stimulus::complex_volume(seed, volume);

    let mut spatial = engine.allocate_grid(plan.spatial_len(), plan.spatial_elem_bytes())?;
    let mut spectrum = engine.allocate_grid(plan.spectrum_len(), plan.spectrum_elem_bytes())?;

    let oracle_input: Vec<Complex128> = match case.kind {
        TransformKind::ComplexToComplex => {
            let native: Vec<C> = master
                .iter()
                .map(|s| C::from_f64_parts(s.re, s.im))
                .collect();
            engine.upload(bytemuck::cast_slice(&native), &mut spatial)?;
            master.clone()
        }
        TransformKind::RealToComplex => {
            // The real volume is the stimulus' real components; the
            // oracle sees its complex embedding.
            let native: Vec<C::Real> = master
                .iter()
                .map(|s| C::real_from_f64(s.re))
                .collect();
            engine.upload(bytemuck::cast_slice(&native), &mut spatial)?;
            master.iter().map(|s| Complex128::new(s.re, 0.0)).collect()
        }
    };

    // Forward transform, then verify against the oracle spectrum.
    engine.execute(&plan, FftDirection::Forward, &spatial, &mut spectrum)?;

    let mut native_spectrum = vec![C::ZERO; plan.spectrum_len()];
    engine.download(&spectrum, bytemuck::cast_slice_mut(&mut native_spectrum))?;
    let found_spectrum: Vec<Complex128> = native_spectrum
        .iter()
        .map(|c| Complex128::new(c.re_f64(), c.im_f64()))
        .collect();

    let reference = oracle::dft_3d(&oracle_input, dims, FftDirection::Forward);
    let expected_spectrum = layout::select_packed(&reference, dims, case.kind);

    check(
        engine,
        case,
        CheckStage::Forward,
        &expected_spectrum,
        &found_spectrum,
    )?;

    // Inverse transform; the recovered volume carries the known
    // volume-fold scale, which the comparison removes.
    engine.execute(&plan, FftDirection::Inverse, &spectrum, &mut spatial)?;
    let rescale = 1.0 / volume as f64;

    let recovered: Vec<Complex128> = match case.kind {
        TransformKind::ComplexToComplex => {
            let mut native = vec![C::ZERO; plan.spatial_len()];
            engine.download(&spatial, bytemuck::cast_slice_mut(&mut native))?;
            native
                .iter()
                .map(|c| Complex128::new(c.re_f64() * rescale, c.im_f64() * rescale))
                .collect()
        }
        TransformKind::RealToComplex => {
            let mut native = vec![C::real_from_f64(0.0); plan.spatial_len()];
            engine.download(&spatial, bytemuck::cast_slice_mut(&mut native))?;
            native
                .iter()
                .map(|&r| Complex128::new(C::real_to_f64(r) * rescale, 0.0))
                .collect()
        }
    };

    check(
        engine,
        case,
        CheckStage::RoundTrip,
        &oracle_input,
        &recovered,
    )?;

    Ok(CaseOutcome::Passed)
}

/// Run the comparator and lift a rejection into the fatal mismatch error
fn check(
    engine: &dyn Fft3dEngine,
    case: &TransformCase,
    stage: CheckStage,
    expected: &[Complex128],
    found: &[Complex128],
) -> Result<()> {
    let tolerance = compare::base_tolerance(case.precision, stage) * case.tolerance_scale;
    let report = compare::compare_volumes(expected, found, tolerance);
    if report.passed {
        return Ok(());
    }

    Err(Error::Mismatch {
        engine: engine.name(),
        stage: stage.label(),
        kind: case.kind.label(),
        x: case.dims.x,
        y: case.dims.y,
        z: case.dims.z,
        precision: case.precision,
        max_rel_error: report.max_rel_error,
        worst_index: report.worst_index,
        tolerance,
        mismatches: report.mismatches,
    })
}

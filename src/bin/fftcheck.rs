//! Harness entry point
//!
//! Sweeps every bundled engine over the shipped case matrix. One optional
//! positional argument selects the precision (`single` or `double`);
//! without it the sweep runs in single precision. Exits 0 after printing
//! `Done` when every case passes, 1 on the first failure of any kind.

use fftcheck::case::case_matrix;
use fftcheck::dtype::Precision;
use fftcheck::engine::{Fft3dEngine, MixedRadixFft3d, StockhamFft3d};
use fftcheck::error::Result;
use fftcheck::harness::{self, DEFAULT_SEED};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => {
            println!("Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let precision = match std::env::args().nth(1) {
        Some(arg) => Precision::parse(&arg)?,
        None => Precision::Single,
    };

    let cases = case_matrix(precision);
    let engines: [Box<dyn Fft3dEngine>; 2] = [
        Box::new(StockhamFft3d::new()),
        Box::new(MixedRadixFft3d::new()),
    ];

    for engine in &engines {
        harness::verify_engine(engine.as_ref(), &cases, DEFAULT_SEED)?;
    }
    Ok(())
}

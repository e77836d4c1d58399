//! # Tape Quality
//!
//! Quality assessment of HTS tapes from position-resolved critical-current
//! measurements: locates the tape, computes piecewise statistics, detects
//! drop-outs and compares everything against a product specification.
//!
//! ## Features
//!
//! - **Tape Section**: on-tape detection relative to the expected current
//! - **Piecewise Statistics**: averages and scatter over fixed tape lengths
//! - **Drop-Out Detection**: local minima with half-maximum widths
//! - **Assessment**: threshold tests per product and defect-free sections
//!
//! ## Quick Start
//!
//! ```
//! use tape_quality::analysis::products::{ProductCatalog, SUPERLINK_PHASE_TEST};
//! use tape_quality::io::measurement::MeasurementSeries;
//! use tape_quality::{assess_tape, AssessmentConfig};
//!
//! // 60 m of tape sampled every 5 mm
//! let positions: Vec<f64> = (0..=12_000).map(|i| i as f64 * 5e-3).collect();
//! let values = vec![150.0; positions.len()];
//! let series = MeasurementSeries::from_columns(&positions, &values)?;
//!
//! let spec = ProductCatalog::builtin().get(SUPERLINK_PHASE_TEST).unwrap();
//! let outcome = assess_tape(series, "T-001", spec, &AssessmentConfig::default())?;
//!
//! for report in &outcome.reports {
//!     println!("{}", report);
//! }
//! assert!(outcome.passed());
//! assert_eq!(outcome.ok_sections.len(), 1);
//! # Ok::<(), tape_quality::AssessmentError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Measurement → Tape Section → Statistics + Drop-Outs → Assessment → Reports + OK Sections
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

// Re-export main types
pub use analysis::assessor::TapeQualityAssessor;
pub use analysis::information::TapeQualityInformation;
pub use analysis::products::ProductCatalog;
pub use analysis::result::{
    AssessmentOutcome, QualityParameterInfo, QualityReport, TapeSection, TestType,
};
pub use analysis::specs::{TapeSpecs, WidthTolerance};
pub use config::AssessmentConfig;
pub use error::AssessmentError;
pub use io::measurement::{MeasurementSeries, Sample};

/// Main assessment function
///
/// Assesses one tape against a product: builds the quality information,
/// runs every test the product defines and splits the tape into usable
/// sections of at least the product's minimum length.
///
/// # Arguments
///
/// * `series` - Measurement of the tape (ascending or descending positions)
/// * `tape_id` - ID of the tape, copied into every report
/// * `spec` - Product specification
/// * `config` - Detection parameters; `use_true_baseline` overrides the
///   product's `width_from_true_baseline` when set
///
/// # Returns
///
/// `AssessmentOutcome` with one report per test, the OK sections and the
/// diagnostics of skipped tests
///
/// # Errors
///
/// Returns `AssessmentError` if the quality information cannot be built
/// (no on-tape samples, invalid expected average, undefined averages).
/// Tests the product cannot run are skipped and listed in the diagnostics.
pub fn assess_tape(
    series: MeasurementSeries,
    tape_id: &str,
    spec: &TapeSpecs,
    config: &AssessmentConfig,
) -> Result<AssessmentOutcome, AssessmentError> {
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!(
        "Starting assessment of tape {}: {} samples, product {}",
        tape_id,
        series.len(),
        spec.description
    );

    let config = AssessmentConfig {
        use_true_baseline: Some(
            config
                .use_true_baseline
                .unwrap_or(spec.width_from_true_baseline),
        ),
        ..config.clone()
    };

    let info = TapeQualityInformation::new(
        tape_id,
        series,
        Some(spec.expected_average()),
        spec.averaging_length,
        &config,
    )?;

    let mut assessor = TapeQualityAssessor::new(&info, spec, &config);
    assessor.assess_meets_specs();
    assessor.determine_ok_tape_sections(spec.min_tape_length);
    let outcome = assessor.into_outcome();

    log::debug!(
        "Assessed tape {} in {:.2} ms: passed={}, {} OK sections ({:.2} m)",
        tape_id,
        start_time.elapsed().as_secs_f64() * 1000.0,
        outcome.passed(),
        outcome.ok_sections.len(),
        outcome.ok_length()
    );

    Ok(outcome)
}

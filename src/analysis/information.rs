//! Quality information of one tape
//!
//! Collects everything the assessor compares against a product: the tape
//! section, piecewise averages and scatter, and the drop-outs. All of it is
//! computed once on construction.
//!
//! # Example
//!
//! ```
//! use tape_quality::analysis::information::TapeQualityInformation;
//! use tape_quality::io::measurement::MeasurementSeries;
//! use tape_quality::AssessmentConfig;
//!
//! let positions: Vec<f64> = (0..=2000).map(|i| i as f64 * 5e-3).collect();
//! let values: Vec<f64> = positions
//!     .iter()
//!     .map(|&x| if (4.0..4.01).contains(&x) { 40.0 } else { 150.0 })
//!     .collect();
//! let series = MeasurementSeries::from_columns(&positions, &values)?;
//!
//! let info = TapeQualityInformation::new(
//!     "T-001",
//!     series,
//!     Some(150.0),
//!     Some(1.0),
//!     &AssessmentConfig::default(),
//! )?;
//! assert_eq!(info.averages().len(), 10);
//! assert_eq!(info.dropouts().len(), 1);
//! # Ok::<(), tape_quality::AssessmentError>(())
//! ```

use super::result::{QualityParameterInfo, TapeSection};
use crate::config::AssessmentConfig;
use crate::error::AssessmentError;
use crate::features::peaks::DropoutDetector;
use crate::features::statistics::{piecewise_statistics, Statistic};
use crate::io::measurement::MeasurementSeries;
use crate::preprocessing::tape_section::{find_tape_bounds, TapeBounds};

/// Quality features of one HTS tape
#[derive(Debug, Clone)]
pub struct TapeQualityInformation {
    tape_id: String,
    series: MeasurementSeries,
    expected_average: f64,
    bounds: TapeBounds,
    averages: Vec<QualityParameterInfo>,
    scattering: Vec<QualityParameterInfo>,
    dropouts: Vec<QualityParameterInfo>,
    width_unit_factor: f64,
    scatter_error: Option<AssessmentError>,
    warnings: Vec<String>,
}

impl TapeQualityInformation {
    /// Compute the quality information of a tape
    ///
    /// # Arguments
    ///
    /// * `tape_id` - ID of the tape
    /// * `series` - Measurement series (normalized on construction)
    /// * `expected_average` - Approximate nominal current, used for the
    ///   on-tape threshold, drop-out candidates and the default baseline
    /// * `averaging_length` - Piece length for averages and scatter
    /// * `config` - Detection parameters
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `expected_average` is unset, non-finite or not positive
    /// - `NoTapeFound` if no sample lies above the on-tape threshold
    /// - `NumericalError` if the piecewise averages cannot be computed
    ///
    /// Scatter that cannot be computed (pieces of a single sample) does not
    /// fail construction: the scatter list stays empty and a warning is kept.
    pub fn new(
        tape_id: impl Into<String>,
        series: MeasurementSeries,
        expected_average: Option<f64>,
        averaging_length: Option<f64>,
        config: &AssessmentConfig,
    ) -> Result<Self, AssessmentError> {
        let tape_id = tape_id.into();

        let expected_average = match expected_average {
            Some(v) if v.is_finite() && v > 0.0 => v,
            Some(v) => {
                return Err(AssessmentError::InvalidInput(format!(
                    "Expected average must be positive, got {}",
                    v
                )))
            }
            None => {
                return Err(AssessmentError::InvalidInput(
                    "Expected average not set".to_string(),
                ))
            }
        };

        log::debug!(
            "Building quality information for tape {}: {} samples, expected average {:.1}",
            tape_id,
            series.len(),
            expected_average
        );

        let bounds = find_tape_bounds(&series, expected_average * config.on_tape_fraction)?;

        let averages =
            piecewise_statistics(&series, &bounds, Statistic::Average, averaging_length)?;

        let mut warnings = Vec::new();
        let mut scatter_error = None;
        let scattering =
            match piecewise_statistics(&series, &bounds, Statistic::Scatter, averaging_length) {
                Ok(scattering) => scattering,
                Err(e) => {
                    log::warn!("Scatter not computed for tape {}: {}", tape_id, e);
                    warnings.push(format!("Scatter not computed: {}", e));
                    scatter_error = Some(e);
                    Vec::new()
                }
            };

        let detector = DropoutDetector {
            expected_average,
            peak_fraction: config.peak_fraction,
            min_distance: config.min_peak_distance,
            use_true_baseline: config.use_true_baseline.unwrap_or(false),
            position_tolerance: config.position_tolerance,
        };
        let dropouts = detector.detect(&series, &bounds, &averages);

        Ok(Self {
            tape_id,
            series,
            expected_average,
            bounds,
            averages,
            scattering,
            dropouts,
            width_unit_factor: config.width_unit_factor,
            scatter_error,
            warnings,
        })
    }

    /// ID of the tape
    pub fn tape_id(&self) -> &str {
        &self.tape_id
    }

    /// Normalized measurement series
    pub fn series(&self) -> &MeasurementSeries {
        &self.series
    }

    /// Expected average the information was computed with
    pub fn expected_average(&self) -> f64 {
        self.expected_average
    }

    /// Section of the series above the on-tape threshold
    pub fn tape_section(&self) -> TapeSection {
        self.bounds.section
    }

    /// Index bounds of the tape section
    pub fn bounds(&self) -> &TapeBounds {
        &self.bounds
    }

    /// Piecewise averages
    pub fn averages(&self) -> &[QualityParameterInfo] {
        &self.averages
    }

    /// Piecewise scatter
    pub fn scattering(&self) -> &[QualityParameterInfo] {
        &self.scattering
    }

    /// Detected drop-outs
    pub fn dropouts(&self) -> &[QualityParameterInfo] {
        &self.dropouts
    }

    /// Why the piecewise scatter is empty, if it could not be computed
    pub fn scatter_error(&self) -> Option<&AssessmentError> {
        self.scatter_error.as_ref()
    }

    /// Problems that left part of the information empty
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Drop-out widths in width-function units (mm by default)
    pub fn dropout_widths(&self) -> Vec<f64> {
        self.dropouts
            .iter()
            .map(|d| d.width() * self.width_unit_factor)
            .collect()
    }

    /// Histogram of drop-out widths
    ///
    /// Returns `(bin_start, count)` pairs for `bins` equal-width bins between
    /// the narrowest and the widest drop-out. Empty without drop-outs or bins.
    pub fn width_histogram(&self, bins: usize) -> Vec<(f64, usize)> {
        let widths = self.dropout_widths();
        if widths.is_empty() || bins == 0 {
            return vec![];
        }

        let min = widths.iter().copied().fold(f64::INFINITY, f64::min);
        let max = widths.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let bin_width = if max > min {
            (max - min) / bins as f64
        } else {
            1.0
        };

        let mut counts = vec![0usize; bins];
        for w in widths {
            let bin = (((w - min) / bin_width) as usize).min(bins - 1);
            counts[bin] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| (min + i as f64 * bin_width, count))
            .collect()
    }
}

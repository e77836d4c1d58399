//! Piecewise statistics over the tape section
//!
//! The tape section is cut into pieces of a fixed length, starting at the
//! section start. Each piece closes at the first sample beyond its nominal
//! end; the last piece runs to the end of the section and absorbs any
//! remainder shorter than the piece length.
//!
//! # Example
//!
//! ```
//! use tape_quality::features::statistics::{piecewise_statistics, Statistic};
//! use tape_quality::io::measurement::MeasurementSeries;
//! use tape_quality::preprocessing::tape_section::find_tape_bounds;
//!
//! let positions: Vec<f64> = (0..=100).map(|i| i as f64 * 0.1).collect();
//! let values = vec![150.0; positions.len()];
//! let series = MeasurementSeries::from_columns(&positions, &values)?;
//! let bounds = find_tape_bounds(&series, 100.0)?;
//!
//! let averages = piecewise_statistics(&series, &bounds, Statistic::Average, Some(2.0))?;
//! assert_eq!(averages.len(), 5);
//! # Ok::<(), tape_quality::AssessmentError>(())
//! ```

use crate::analysis::result::{IntervalInfo, QualityParameterInfo};
use crate::error::AssessmentError;
use crate::io::measurement::MeasurementSeries;
use crate::preprocessing::tape_section::TapeBounds;
use serde::{Deserialize, Serialize};

/// Piecewise statistic kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statistic {
    /// Arithmetic mean
    Average,
    /// Sample standard deviation (n - 1)
    Scatter,
}

impl Statistic {
    fn compute(&self, values: &[f64]) -> Result<f64, AssessmentError> {
        match self {
            Statistic::Average => mean(values),
            Statistic::Scatter => sample_std_dev(values),
        }
    }

    fn info(
        &self,
        id: usize,
        start_position: f64,
        end_position: f64,
        value: f64,
    ) -> QualityParameterInfo {
        let interval = IntervalInfo {
            id,
            start_position,
            end_position,
            value,
        };
        match self {
            Statistic::Average => QualityParameterInfo::Average(interval),
            Statistic::Scatter => QualityParameterInfo::Scatter(interval),
        }
    }
}

/// Compute a statistic over consecutive pieces of the tape section
///
/// # Arguments
///
/// * `series` - Normalized measurement series
/// * `bounds` - Tape bounds within `series`
/// * `statistic` - Statistic to compute per piece
/// * `piece_length` - Nominal piece length; `None` or a non-positive length
///   uses the whole tape section as one piece
///
/// # Returns
///
/// One interval per piece, ids `0..n`, covering the tape section without
/// gaps or overlaps.
///
/// # Errors
///
/// Returns `AssessmentError::NumericalError` if a piece holds too few samples
/// for the statistic (scatter of a single sample).
pub fn piecewise_statistics(
    series: &MeasurementSeries,
    bounds: &TapeBounds,
    statistic: Statistic,
    piece_length: Option<f64>,
) -> Result<Vec<QualityParameterInfo>, AssessmentError> {
    let start_index = bounds.start_index;
    let end_index = bounds.end_index;
    let start_position = series.position(start_index);
    let end_position = series.position(end_index);

    log::debug!(
        "Computing piecewise {:?} over {:.3}..{:.3}, piece_length={:?}",
        statistic,
        start_position,
        end_position,
        piece_length
    );

    let length = match piece_length {
        Some(l) if l > 0.0 && l.is_finite() => l,
        _ => end_position - start_position,
    };

    let mut infos = Vec::new();
    let mut last_index = start_index;

    if length > 0.0 {
        // Boundaries are recomputed from the step count so that tiny lengths
        // cannot stall on floating-point addition.
        let mut step = 1usize;
        let mut next_position = start_position + length;

        while next_position < end_position {
            let next_index = (last_index..=end_index)
                .find(|&i| series.position(i) > next_position)
                .unwrap_or(end_index);

            // the remainder belongs to the final piece
            if next_index >= end_index {
                break;
            }

            if next_index > last_index {
                let values = series.values(last_index..next_index);
                let value = statistic.compute(&values)?;
                infos.push(statistic.info(
                    infos.len(),
                    series.position(last_index),
                    series.position(next_index),
                    value,
                ));
                last_index = next_index;
                step += 1;
            } else {
                // sampling coarser than the piece length: skip empty pieces
                let covered = (series.position(last_index) - start_position) / length;
                step = (step + 1).max(covered.floor() as usize + 1);
            }

            next_position = start_position + step as f64 * length;
        }
    }

    let values = series.values(last_index..end_index + 1);
    let value = statistic.compute(&values)?;
    infos.push(statistic.info(
        infos.len(),
        series.position(last_index),
        end_position,
        value,
    ));

    log::debug!("Computed {} {:?} intervals", infos.len(), statistic);

    Ok(infos)
}

/// Arithmetic mean
///
/// # Errors
///
/// Returns `AssessmentError::NumericalError` for an empty slice.
pub fn mean(values: &[f64]) -> Result<f64, AssessmentError> {
    if values.is_empty() {
        return Err(AssessmentError::NumericalError(
            "Mean of an empty interval".to_string(),
        ));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation with Bessel's correction
///
/// # Errors
///
/// Returns `AssessmentError::NumericalError` for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> Result<f64, AssessmentError> {
    if values.len() < 2 {
        return Err(AssessmentError::NumericalError(format!(
            "Scatter needs at least 2 samples, got {}",
            values.len()
        )));
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Ok((sum_sq / (values.len() - 1) as f64).sqrt())
}

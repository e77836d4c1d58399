//! On-tape detection
//!
//! The measured current is close to zero before the tape enters and after it
//! leaves the measurement head. The tape section is the range between the
//! first and the last sample above a fraction of the expected average.

use crate::analysis::result::TapeSection;
use crate::error::AssessmentError;
use crate::io::measurement::MeasurementSeries;

/// Index and position bounds of the tape within a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapeBounds {
    /// Index of the first on-tape sample
    pub start_index: usize,
    /// Index of the last on-tape sample
    pub end_index: usize,
    /// Positions of the two samples
    pub section: TapeSection,
}

impl TapeBounds {
    /// True if `index` lies within the on-tape index range
    pub fn contains_index(&self, index: usize) -> bool {
        index >= self.start_index && index <= self.end_index
    }
}

/// Find the tape within a series
///
/// # Arguments
///
/// * `series` - Normalized measurement series
/// * `threshold` - Samples strictly above this value are on the tape
///
/// # Errors
///
/// Returns `AssessmentError::NoTapeFound` if no sample exceeds `threshold`.
pub fn find_tape_bounds(
    series: &MeasurementSeries,
    threshold: f64,
) -> Result<TapeBounds, AssessmentError> {
    log::debug!(
        "Detecting tape in {} samples, threshold={:.3}",
        series.len(),
        threshold
    );

    let samples = series.samples();
    let start_index = samples.iter().position(|s| s.value > threshold);
    let end_index = samples.iter().rposition(|s| s.value > threshold);

    let (start_index, end_index) = match (start_index, end_index) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(AssessmentError::NoTapeFound(format!(
                "no sample above {:.3} in {} samples",
                threshold,
                samples.len()
            )))
        }
    };

    let section = TapeSection::new(series.position(start_index), series.position(end_index));

    log::debug!(
        "Tape section: indices {}..={}, positions {:.4}..{:.4}",
        start_index,
        end_index,
        section.start_position,
        section.end_position
    );

    Ok(TapeBounds {
        start_index,
        end_index,
        section,
    })
}

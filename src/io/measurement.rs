//! Position-indexed critical-current measurement series

use crate::error::AssessmentError;
use serde::{Deserialize, Serialize};

/// One measurement point: critical current at a tape position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Position along the tape (metres)
    pub position: f64,
    /// Measured critical current (A)
    pub value: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(position: f64, value: f64) -> Self {
        Self { position, value }
    }
}

/// Ordered measurement series for one tape
///
/// Positions increase along the series. A series recorded from the far end
/// of the tape (last position smaller than the first) is reversed once on
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementSeries {
    samples: Vec<Sample>,
}

impl MeasurementSeries {
    /// Create a series from samples
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::InvalidInput` if the series is empty or
    /// contains non-finite positions or values.
    pub fn new(mut samples: Vec<Sample>) -> Result<Self, AssessmentError> {
        if samples.is_empty() {
            return Err(AssessmentError::InvalidInput(
                "Empty measurement series".to_string(),
            ));
        }

        if let Some(idx) = samples
            .iter()
            .position(|s| !s.position.is_finite() || !s.value.is_finite())
        {
            return Err(AssessmentError::InvalidInput(format!(
                "Non-finite sample at index {}",
                idx
            )));
        }

        let first = samples[0].position;
        let last = samples[samples.len() - 1].position;
        if last < first {
            log::debug!(
                "Reversing series of {} samples ({:.3} > {:.3})",
                samples.len(),
                first,
                last
            );
            samples.reverse();
        }

        Ok(Self { samples })
    }

    /// Create a series from parallel position and value slices
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::InvalidInput` if the slices differ in length,
    /// plus every error of [`MeasurementSeries::new`].
    pub fn from_columns(positions: &[f64], values: &[f64]) -> Result<Self, AssessmentError> {
        if positions.len() != values.len() {
            return Err(AssessmentError::InvalidInput(format!(
                "Column length mismatch: {} positions, {} values",
                positions.len(),
                values.len()
            )));
        }

        let samples = positions
            .iter()
            .zip(values)
            .map(|(&position, &value)| Sample { position, value })
            .collect();
        Self::new(samples)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed series
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All samples in ascending position order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Position of sample `index`
    pub fn position(&self, index: usize) -> f64 {
        self.samples[index].position
    }

    /// Value of sample `index`
    pub fn value(&self, index: usize) -> f64 {
        self.samples[index].value
    }

    /// Values of the samples in `range`
    pub fn values(&self, range: std::ops::Range<usize>) -> Vec<f64> {
        self.samples[range].iter().map(|s| s.value).collect()
    }

    /// Index of the last sample
    pub fn last_index(&self) -> usize {
        self.samples.len() - 1
    }
}

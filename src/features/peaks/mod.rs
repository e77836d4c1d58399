//! Drop-out detection
//!
//! A drop-out is a local dip of the critical current well below the
//! expected level. Each dip is measured at half maximum between its minimum
//! and the local baseline:
//!
//! 1. Local minima at or below `peak_fraction × expected_average`
//! 2. Minima outside the tape section are discarded
//! 3. Baseline: the piecewise average around the minimum (true baseline)
//!    or the expected average
//! 4. Start and end: interpolated half-maximum crossings
//! 5. Dips whose bounds coincide within the position tolerance are one
//!    defect; the deepest is kept

pub mod half_max;
pub mod peak_picking;

use crate::analysis::result::{PeakInfo, QualityParameterInfo};
use crate::io::measurement::MeasurementSeries;
use crate::preprocessing::tape_section::TapeBounds;
use half_max::{half_max_position, Direction};
use peak_picking::find_minima;

/// Drop-out detection parameters
#[derive(Debug, Clone, PartialEq)]
pub struct DropoutDetector {
    /// Approximate nominal current (A)
    pub expected_average: f64,

    /// Fraction of `expected_average` at or below which a minimum is a candidate
    pub peak_fraction: f64,

    /// Minimum index distance between candidates
    pub min_distance: usize,

    /// Use the piecewise average containing the minimum as baseline
    pub use_true_baseline: bool,

    /// Maximum start and end offset for two dips to be the same defect
    pub position_tolerance: f64,
}

impl DropoutDetector {
    /// Detector with default fraction (0.8), distance (10) and tolerance (2e-3)
    pub fn new(expected_average: f64) -> Self {
        Self {
            expected_average,
            peak_fraction: 0.8,
            min_distance: 10,
            use_true_baseline: false,
            position_tolerance: 2e-3,
        }
    }

    /// Detect drop-outs
    ///
    /// # Arguments
    ///
    /// * `series` - Normalized measurement series
    /// * `bounds` - Tape bounds within `series`
    /// * `averages` - Piecewise averages used as true baseline
    ///
    /// # Returns
    ///
    /// Peak infos in tape order, ids `0..n`. A minimum that does not lie
    /// below its baseline has no half maximum and is not reported.
    pub fn detect(
        &self,
        series: &MeasurementSeries,
        bounds: &TapeBounds,
        averages: &[QualityParameterInfo],
    ) -> Vec<QualityParameterInfo> {
        let ceiling = self.expected_average * self.peak_fraction;
        let values: Vec<f64> = series.samples().iter().map(|s| s.value).collect();

        let candidates: Vec<(usize, f64)> = find_minima(&values, ceiling, self.min_distance)
            .into_iter()
            .filter(|&(idx, _)| bounds.contains_index(idx))
            .collect();

        log::debug!(
            "Measuring {} drop-out candidates, true_baseline={}",
            candidates.len(),
            self.use_true_baseline
        );

        let mut peaks: Vec<PeakInfo> = Vec::new();

        for (index, value) in candidates {
            let position = series.position(index);
            let baseline = self.baseline_at(position, averages);

            if value >= baseline {
                log::debug!(
                    "Skipping minimum at {:.4} ({:.1}), not below baseline {:.1}",
                    position,
                    value,
                    baseline
                );
                continue;
            }

            let half_max = (value + baseline) / 2.0;
            let current = PeakInfo {
                id: 0,
                start_position: half_max_position(series, index, half_max, Direction::Backward),
                end_position: half_max_position(series, index, half_max, Direction::Forward),
                center_position: position,
                value,
            };

            // only the most recent drop-out can be the same defect
            match peaks.last_mut() {
                Some(last) if self.same_defect(last, &current) => {
                    if current.value < last.value {
                        *last = current;
                    }
                }
                _ => peaks.push(current),
            }
        }

        log::debug!("Detected {} drop-outs", peaks.len());

        peaks
            .into_iter()
            .enumerate()
            .map(|(id, peak)| QualityParameterInfo::Peak(PeakInfo { id, ..peak }))
            .collect()
    }

    fn baseline_at(&self, position: f64, averages: &[QualityParameterInfo]) -> f64 {
        if !self.use_true_baseline {
            return self.expected_average;
        }
        averages
            .iter()
            .find(|a| position >= a.start_position() && position <= a.end_position())
            .map(|a| a.value())
            .unwrap_or(self.expected_average)
    }

    fn same_defect(&self, a: &PeakInfo, b: &PeakInfo) -> bool {
        (a.start_position - b.start_position).abs() <= self.position_tolerance
            && (a.end_position - b.end_position).abs() <= self.position_tolerance
    }
}

//! Configuration parameters for tape quality assessment

use serde::{Deserialize, Serialize};

/// Assessment configuration parameters
///
/// Product thresholds live in [`TapeSpecs`](crate::analysis::specs::TapeSpecs);
/// this struct holds the detection parameters that are the same for every
/// product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    // Tape section
    /// Fraction of the expected average above which a sample is on the tape (default: 0.8)
    pub on_tape_fraction: f64,

    // Drop-out detection
    /// Fraction of the expected average at or below which a local minimum
    /// is a drop-out candidate (default: 0.8)
    pub peak_fraction: f64,

    /// Minimum index separation between accepted minima (default: 10 samples)
    pub min_peak_distance: usize,

    /// Tolerance for two drop-outs to be treated as the same defect, in
    /// position units (default: 2e-3, i.e. 2 mm for positions in metres)
    pub position_tolerance: f64,

    /// Use the local piecewise average as drop-out baseline instead of the
    /// expected average. `None` takes the product's setting.
    pub use_true_baseline: Option<bool>,

    // Units
    /// Factor converting position units into the units of the product's
    /// width tolerance function (default: 1000.0, metres to millimetres)
    pub width_unit_factor: f64,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            on_tape_fraction: 0.8,
            peak_fraction: 0.8,
            min_peak_distance: 10,
            position_tolerance: 2e-3,
            use_true_baseline: None,
            width_unit_factor: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AssessmentConfig::default();
        assert_eq!(config.on_tape_fraction, 0.8);
        assert_eq!(config.min_peak_distance, 10);
        assert_eq!(config.use_true_baseline, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AssessmentConfig =
            serde_json::from_str(r#"{ "min_peak_distance": 3 }"#).unwrap();
        assert_eq!(config.min_peak_distance, 3);
        assert_eq!(config.position_tolerance, 2e-3);
        assert_eq!(config.width_unit_factor, 1000.0);
    }
}

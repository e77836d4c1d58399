//! Product specifications

use serde::{Deserialize, Serialize};

/// Maximum allowed drop-out width as a function of drop-out depth
///
/// Maps the minimum current of a drop-out (A) to the widest half-maximum
/// width it may have (width-function units, millimetres by default). Curves
/// are expected to increase monotonically with current: the deeper the
/// drop-out, the narrower it has to be.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidthTolerance {
    /// `a · exp(b · value)`
    Exponential {
        /// Prefactor
        a: f64,
        /// Exponent per ampere
        b: f64,
    },
    /// `slope · value + intercept`
    Linear {
        /// Width per ampere
        slope: f64,
        /// Width at zero current
        intercept: f64,
    },
    /// Same maximum width at every depth
    Constant {
        /// Maximum width
        width: f64,
    },
    /// Arbitrary curve supplied in code
    #[serde(skip)]
    Custom(fn(f64) -> f64),
}

impl WidthTolerance {
    /// Maximum allowed width at `value`
    pub fn max_width(&self, value: f64) -> f64 {
        match *self {
            WidthTolerance::Exponential { a, b } => a * (b * value).exp(),
            WidthTolerance::Linear { slope, intercept } => slope * value + intercept,
            WidthTolerance::Constant { width } => width,
            WidthTolerance::Custom(f) => f(value),
        }
    }
}

/// Quality specification of a tape product
///
/// Lengths and positions are in metres, currents in amperes, the tape width
/// in millimetres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TapeSpecs {
    /// Tape width (mm)
    pub width: f64,

    /// Shortest usable piece of tape
    pub min_tape_length: f64,

    /// No drop-out may fall below this current
    pub min_value: f64,

    /// Drop-outs below this current fail regardless of width
    #[serde(default)]
    pub dropout_value: Option<f64>,

    /// Maximum drop-out width as a function of drop-out depth
    #[serde(default)]
    pub dropout_width_fn: Option<WidthTolerance>,

    /// Measure drop-out widths against the local average instead of the
    /// expected average
    #[serde(default)]
    pub width_from_true_baseline: bool,

    /// Minimum piecewise average
    #[serde(default)]
    pub min_average: Option<f64>,

    /// Piece length for averages and scatter; `None` averages the whole tape
    #[serde(default)]
    pub averaging_length: Option<f64>,

    /// Maximum piecewise scatter; the scatter test only runs when set
    #[serde(default)]
    pub max_scatter: Option<f64>,

    /// Product name
    pub description: String,
}

impl TapeSpecs {
    /// Drop-out thresholds, if the product defines both of them
    pub fn dropout_thresholds(&self) -> Option<(f64, WidthTolerance)> {
        match (self.dropout_value, self.dropout_width_fn) {
            (Some(value), Some(width_fn)) => Some((value, width_fn)),
            _ => None,
        }
    }

    /// Approximate nominal current of a tape of this product
    ///
    /// The minimum average when the product defines one, otherwise an
    /// estimate from the tape width (width × 1.9 × 3 × 10).
    pub fn expected_average(&self) -> f64 {
        self.min_average.unwrap_or(self.width * 1.9 * 3.0 * 10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> TapeSpecs {
        TapeSpecs {
            width: 12.0,
            min_tape_length: 25.0,
            min_value: 500.0,
            dropout_value: None,
            dropout_width_fn: None,
            width_from_true_baseline: true,
            min_average: None,
            averaging_length: None,
            max_scatter: None,
            description: "Test tape".to_string(),
        }
    }

    #[test]
    fn test_width_tolerance_curves() {
        let exp = WidthTolerance::Exponential {
            a: 1.43587,
            b: 0.027726,
        };
        assert!((exp.max_width(0.0) - 1.43587).abs() < 1e-12);
        assert!(exp.max_width(100.0) > exp.max_width(50.0));

        let lin = WidthTolerance::Linear {
            slope: 0.1,
            intercept: 2.0,
        };
        assert!((lin.max_width(30.0) - 5.0).abs() < 1e-12);

        assert_eq!(WidthTolerance::Constant { width: 20.0 }.max_width(1.0), 20.0);

        fn doubled(v: f64) -> f64 {
            2.0 * v
        }
        assert_eq!(WidthTolerance::Custom(doubled).max_width(4.0), 8.0);
    }

    #[test]
    fn test_expected_average() {
        let mut s = spec();
        assert!((s.expected_average() - 684.0).abs() < 1e-9);
        s.min_average = Some(700.0);
        assert_eq!(s.expected_average(), 700.0);
    }

    #[test]
    fn test_dropout_thresholds_need_both() {
        let mut s = spec();
        assert!(s.dropout_thresholds().is_none());
        s.dropout_value = Some(150.0);
        assert!(s.dropout_thresholds().is_none());
        s.dropout_width_fn = Some(WidthTolerance::Constant { width: 20.0 });
        assert_eq!(s.dropout_thresholds().map(|(v, _)| v), Some(150.0));
    }

    #[test]
    fn test_spec_from_json() {
        let json = r#"{
            "width": 3.0,
            "min_tape_length": 190.0,
            "min_value": 100.0,
            "dropout_value": 20.0,
            "dropout_width_fn": { "kind": "exponential", "a": 1.43587, "b": 0.027726 },
            "min_average": 135.0,
            "averaging_length": 1.0,
            "description": "SuperLink Phase"
        }"#;
        let s: TapeSpecs = serde_json::from_str(json).unwrap();
        assert!(!s.width_from_true_baseline);
        assert!(s.max_scatter.is_none());
        assert!(matches!(
            s.dropout_width_fn,
            Some(WidthTolerance::Exponential { .. })
        ));
    }
}

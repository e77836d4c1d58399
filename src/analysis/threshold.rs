//! Pass/fail thresholds on quality parameters

use super::result::QualityParameterInfo;
use super::specs::WidthTolerance;

/// Limit on a parameter value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueLimit {
    /// Values below the limit fail
    Min(f64),
    /// Values above the limit fail
    Max(f64),
}

impl ValueLimit {
    fn violated_by(&self, value: f64) -> bool {
        match *self {
            ValueLimit::Min(limit) => value < limit,
            ValueLimit::Max(limit) => value > limit,
        }
    }
}

/// Pass/fail boundary for quality parameters
///
/// A parameter fails if it violates the value limit or if its width exceeds
/// the width tolerance evaluated at its value. A threshold with neither set
/// passes everything.
#[derive(Debug, Clone, Copy)]
pub struct Threshold {
    /// Value limit
    pub value: Option<ValueLimit>,
    /// Depth-dependent maximum width
    pub width: Option<WidthTolerance>,
    /// Factor converting parameter widths into tolerance units
    pub width_unit_factor: f64,
}

impl Threshold {
    /// Fails values below `limit`
    pub fn min_value(limit: f64) -> Self {
        Self {
            value: Some(ValueLimit::Min(limit)),
            width: None,
            width_unit_factor: 1.0,
        }
    }

    /// Fails values above `limit`
    pub fn max_value(limit: f64) -> Self {
        Self {
            value: Some(ValueLimit::Max(limit)),
            width: None,
            width_unit_factor: 1.0,
        }
    }

    /// Additionally fail parameters wider than `tolerance`
    pub fn with_width(mut self, tolerance: WidthTolerance, width_unit_factor: f64) -> Self {
        self.width = Some(tolerance);
        self.width_unit_factor = width_unit_factor;
        self
    }

    /// True if `info` fails this threshold
    pub fn is_violated_by(&self, info: &QualityParameterInfo) -> bool {
        let value_fail = self
            .value
            .map(|limit| limit.violated_by(info.value()))
            .unwrap_or(false);
        let width_fail = self
            .width
            .map(|tolerance| info.width() * self.width_unit_factor > tolerance.max_width(info.value()))
            .unwrap_or(false);
        value_fail || width_fail
    }

    /// Parameters failing this threshold, in input order
    pub fn failures(&self, infos: &[QualityParameterInfo]) -> Vec<QualityParameterInfo> {
        infos
            .iter()
            .filter(|info| self.is_violated_by(info))
            .cloned()
            .collect()
    }
}

//! Assessment result types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Contiguous section of tape between two positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapeSection {
    /// Start position (metres)
    pub start_position: f64,
    /// End position (metres)
    pub end_position: f64,
}

impl TapeSection {
    /// Create a new section
    pub fn new(start_position: f64, end_position: f64) -> Self {
        Self {
            start_position,
            end_position,
        }
    }

    /// Length of the section
    pub fn length(&self) -> f64 {
        self.end_position - self.start_position
    }

    /// True if `[start, end]` shares at least one position with this section
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        start <= self.end_position && end >= self.start_position
    }
}

/// Quality test types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestType {
    /// Piecewise average above the product minimum
    Average,
    /// Piecewise scatter below the product maximum
    Scatter,
    /// Every drop-out above the product minimum value
    Minimum,
    /// Drop-outs within the product's depth and width limits
    DropOut,
}

impl TestType {
    /// Human-readable test name
    pub fn name(&self) -> &'static str {
        match self {
            TestType::Average => "Average Value",
            TestType::Scatter => "Scatter",
            TestType::Minimum => "Minimum Value",
            TestType::DropOut => "Drop Out",
        }
    }
}

/// Detected drop-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakInfo {
    /// Index of the drop-out along the tape
    pub id: usize,
    /// Interpolated half-maximum start position
    pub start_position: f64,
    /// Interpolated half-maximum end position
    pub end_position: f64,
    /// Position of the minimum sample
    pub center_position: f64,
    /// Current at the minimum (A)
    pub value: f64,
}

/// Statistic computed over one tape interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalInfo {
    /// Index of the interval along the tape
    pub id: usize,
    /// Interval start position
    pub start_position: f64,
    /// Interval end position
    pub end_position: f64,
    /// Statistic value (A)
    pub value: f64,
}

/// Quality parameter measured on a tape
///
/// All variants expose the same accessors; only the description and the
/// center position differ between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum QualityParameterInfo {
    /// Drop-out with half-maximum bounds
    Peak(PeakInfo),
    /// Piecewise mean
    Average(IntervalInfo),
    /// Piecewise sample standard deviation
    Scatter(IntervalInfo),
}

impl QualityParameterInfo {
    /// Parameter id
    pub fn id(&self) -> usize {
        match self {
            QualityParameterInfo::Peak(p) => p.id,
            QualityParameterInfo::Average(i) | QualityParameterInfo::Scatter(i) => i.id,
        }
    }

    /// Start position
    pub fn start_position(&self) -> f64 {
        match self {
            QualityParameterInfo::Peak(p) => p.start_position,
            QualityParameterInfo::Average(i) | QualityParameterInfo::Scatter(i) => {
                i.start_position
            }
        }
    }

    /// End position
    pub fn end_position(&self) -> f64 {
        match self {
            QualityParameterInfo::Peak(p) => p.end_position,
            QualityParameterInfo::Average(i) | QualityParameterInfo::Scatter(i) => i.end_position,
        }
    }

    /// Detected minimum for peaks, interval midpoint otherwise
    pub fn center_position(&self) -> f64 {
        match self {
            QualityParameterInfo::Peak(p) => p.center_position,
            QualityParameterInfo::Average(i) | QualityParameterInfo::Scatter(i) => {
                (i.start_position + i.end_position) / 2.0
            }
        }
    }

    /// Parameter value
    pub fn value(&self) -> f64 {
        match self {
            QualityParameterInfo::Peak(p) => p.value,
            QualityParameterInfo::Average(i) | QualityParameterInfo::Scatter(i) => i.value,
        }
    }

    /// End minus start position
    pub fn width(&self) -> f64 {
        self.end_position() - self.start_position()
    }

    /// Human-readable description (positions in m, widths in mm, values in A)
    pub fn description(&self) -> String {
        match self {
            QualityParameterInfo::Peak(p) => format!(
                "Peak at {:.2}m, width: {:.1}mm, value: {:.0}A",
                p.center_position,
                self.width() * 1000.0,
                p.value
            ),
            QualityParameterInfo::Average(i) => format!(
                "Average between {:.2}m and {:.2}m is {:.0}A",
                i.start_position, i.end_position, i.value
            ),
            QualityParameterInfo::Scatter(i) => format!(
                "Scatter between {:.2}m and {:.2}m is {:.0}A",
                i.start_position, i.end_position, i.value
            ),
        }
    }
}

/// Result of one quality test on one tape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// ID of the tested tape
    pub tape_id: String,
    /// Test that produced the report
    pub test_type: TestType,
    /// Parameters that failed the test, in tape order
    pub fail_information: Vec<QualityParameterInfo>,
}

impl QualityReport {
    /// Create a report
    pub fn new(
        tape_id: impl Into<String>,
        test_type: TestType,
        fail_information: Vec<QualityParameterInfo>,
    ) -> Self {
        Self {
            tape_id: tape_id.into(),
            test_type,
            fail_information,
        }
    }

    /// True if nothing failed
    pub fn passed(&self) -> bool {
        self.fail_information.is_empty()
    }
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tape {} passed: {}", self.tape_id, self.passed())?;
        if !self.passed() {
            write!(f, "\nFailed due to: {}", self.test_type.name())?;
            for fail in &self.fail_information {
                write!(f, "\n{}", fail.description())?;
            }
        }
        Ok(())
    }
}

/// Complete assessment of one tape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    /// ID of the assessed tape
    pub tape_id: String,

    /// Section of the series above the on-tape threshold
    pub tape_section: TapeSection,

    /// One report per test that could run
    pub reports: Vec<QualityReport>,

    /// Defect-free sections at least as long as the product minimum,
    /// sorted by start position
    pub ok_sections: Vec<TapeSection>,

    /// Tests or statistics that were skipped, with the reason
    pub diagnostics: Vec<String>,
}

impl AssessmentOutcome {
    /// True if every report passed
    pub fn passed(&self) -> bool {
        self.reports.iter().all(QualityReport::passed)
    }

    /// Total usable length
    pub fn ok_length(&self) -> f64 {
        self.ok_sections.iter().map(TapeSection::length).sum()
    }
}

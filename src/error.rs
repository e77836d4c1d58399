//! Error types for the tape quality engine

use std::fmt;

/// Errors that can occur while building quality information or assessing a tape
#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentError {
    /// Invalid input (empty or malformed series, missing expected average)
    InvalidInput(String),

    /// No sample of the series lies above the on-tape threshold
    NoTapeFound(String),

    /// A requested test lacks the thresholds it needs in the product spec
    SpecificationMissing(String),

    /// Numerical error (undefined statistic, degenerate interval)
    NumericalError(String),

    /// Malformed product catalog or configuration
    ConfigError(String),
}

impl fmt::Display for AssessmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AssessmentError::NoTapeFound(msg) => write!(f, "No tape found: {}", msg),
            AssessmentError::SpecificationMissing(msg) => {
                write!(f, "Specification missing: {}", msg)
            }
            AssessmentError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
            AssessmentError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AssessmentError {}

impl From<serde_json::Error> for AssessmentError {
    fn from(err: serde_json::Error) -> Self {
        AssessmentError::ConfigError(err.to_string())
    }
}

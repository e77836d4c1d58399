//! Assessment of tape quality against a product specification
//!
//! The assessor runs the threshold tests the product asks for, keeps one
//! report per test, and cuts the failed positions out of the tape to find
//! the usable sections. A test whose thresholds the product does not define
//! is skipped with a diagnostic; the other tests still run.
//!
//! # Example
//!
//! ```
//! use tape_quality::analysis::assessor::TapeQualityAssessor;
//! use tape_quality::analysis::information::TapeQualityInformation;
//! use tape_quality::analysis::products::{ProductCatalog, SUPERLINK_PHASE_TEST};
//! use tape_quality::io::measurement::MeasurementSeries;
//! use tape_quality::AssessmentConfig;
//!
//! let spec = ProductCatalog::builtin().get(SUPERLINK_PHASE_TEST).unwrap();
//! let config = AssessmentConfig::default();
//!
//! let positions: Vec<f64> = (0..=60_000).map(|i| i as f64 * 1e-3).collect();
//! let values = vec![150.0; positions.len()];
//! let series = MeasurementSeries::from_columns(&positions, &values)?;
//!
//! let info = TapeQualityInformation::new("T-7", series, Some(135.0), Some(1.0), &config)?;
//! let mut assessor = TapeQualityAssessor::new(&info, spec, &config);
//! assessor.assess_meets_specs();
//! assessor.determine_ok_tape_sections(spec.min_tape_length);
//!
//! assert!(assessor.quality_reports().iter().all(|r| r.passed()));
//! assert_eq!(assessor.ok_tape_sections().len(), 1);
//! # Ok::<(), tape_quality::AssessmentError>(())
//! ```

use super::information::TapeQualityInformation;
use super::result::{
    AssessmentOutcome, QualityParameterInfo, QualityReport, TapeSection, TestType,
};
use super::sections::ok_sections;
use super::specs::TapeSpecs;
use super::threshold::Threshold;
use crate::config::AssessmentConfig;
use crate::error::AssessmentError;

/// Compares the quality information of one tape with a product spec
///
/// Reports and sections accumulate over one assessment run; use a new
/// assessor for every tape.
#[derive(Debug)]
pub struct TapeQualityAssessor<'a> {
    info: &'a TapeQualityInformation,
    specs: &'a TapeSpecs,
    width_unit_factor: f64,
    quality_reports: Vec<QualityReport>,
    ok_tape_sections: Vec<TapeSection>,
    diagnostics: Vec<String>,
}

impl<'a> TapeQualityAssessor<'a> {
    /// Create an assessor for one tape
    pub fn new(
        info: &'a TapeQualityInformation,
        specs: &'a TapeSpecs,
        config: &AssessmentConfig,
    ) -> Self {
        Self {
            info,
            specs,
            width_unit_factor: config.width_unit_factor,
            quality_reports: Vec::new(),
            ok_tape_sections: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Run every test the product defines and store the reports
    ///
    /// - Average test, if the product has a minimum average
    /// - Drop-out test if the product defines drop-out thresholds,
    ///   minimum value test otherwise
    /// - Scatter test, if the product has a maximum scatter
    pub fn assess_meets_specs(&mut self) {
        log::debug!(
            "Assessing tape {} against {}",
            self.info.tape_id(),
            self.specs.description
        );

        match self.assess_average_value() {
            Ok(report) => self.quality_reports.push(report),
            Err(e) => self.skip(TestType::Average, e),
        }

        if self.specs.dropout_thresholds().is_some() {
            match self.assess_dropouts() {
                Ok(report) => self.quality_reports.push(report),
                Err(e) => self.skip(TestType::DropOut, e),
            }
        } else {
            let report = self.assess_min_value();
            self.quality_reports.push(report);
        }

        if self.specs.max_scatter.is_some() {
            match self.assess_scatter() {
                Ok(report) => self.quality_reports.push(report),
                Err(e) => self.skip(TestType::Scatter, e),
            }
        }

        log::debug!(
            "Tape {}: {} reports, {} failed",
            self.info.tape_id(),
            self.quality_reports.len(),
            self.quality_reports.iter().filter(|r| !r.passed()).count()
        );
    }

    /// Piecewise averages below the product's minimum average
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::SpecificationMissing` if the product has no
    /// minimum average.
    pub fn assess_average_value(&self) -> Result<QualityReport, AssessmentError> {
        let min_average = self.specs.min_average.ok_or_else(|| {
            AssessmentError::SpecificationMissing("Averages are not specified".to_string())
        })?;

        let fails = Threshold::min_value(min_average).failures(self.info.averages());
        Ok(self.report(TestType::Average, fails))
    }

    /// Drop-outs below the product's minimum value
    pub fn assess_min_value(&self) -> QualityReport {
        let fails = Threshold::min_value(self.specs.min_value).failures(self.info.dropouts());
        self.report(TestType::Minimum, fails)
    }

    /// Drop-outs too deep or too wide for the product
    ///
    /// A dip below the minimum value is a drop-out; a drop-out fails if it
    /// lies below the product's drop-out value or if its half-maximum width
    /// exceeds the product's width tolerance at its depth.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::SpecificationMissing` if the product lacks
    /// the drop-out value or the width tolerance.
    pub fn assess_dropouts(&self) -> Result<QualityReport, AssessmentError> {
        let (dropout_value, width_fn) = self.specs.dropout_thresholds().ok_or_else(|| {
            AssessmentError::SpecificationMissing("Drop-outs are not specified".to_string())
        })?;

        let candidates = Threshold::min_value(self.specs.min_value).failures(self.info.dropouts());
        let fails = Threshold::min_value(dropout_value)
            .with_width(width_fn, self.width_unit_factor)
            .failures(&candidates);

        Ok(self.report(TestType::DropOut, fails))
    }

    /// Piecewise scatter above the product's maximum scatter
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::SpecificationMissing` if the product has no
    /// maximum scatter, and the scatter error of the quality information
    /// (`NumericalError`) if the piecewise scatter could not be computed.
    pub fn assess_scatter(&self) -> Result<QualityReport, AssessmentError> {
        let max_scatter = self.specs.max_scatter.ok_or_else(|| {
            AssessmentError::SpecificationMissing("Scatter is not specified".to_string())
        })?;

        if let Some(e) = self.info.scatter_error() {
            return Err(e.clone());
        }
        if self.info.scattering().is_empty() {
            return Err(AssessmentError::NumericalError(
                "No scatter intervals".to_string(),
            ));
        }

        let fails = Threshold::max_value(max_scatter).failures(self.info.scattering());
        Ok(self.report(TestType::Scatter, fails))
    }

    /// Find the defect-free sections at least `min_length` long
    pub fn determine_ok_tape_sections(&mut self, min_length: f64) {
        self.ok_tape_sections =
            ok_sections(self.info.tape_section(), &self.quality_reports, min_length);
    }

    /// Reports of the tests run so far
    pub fn quality_reports(&self) -> &[QualityReport] {
        &self.quality_reports
    }

    /// Usable sections found by the last `determine_ok_tape_sections`
    pub fn ok_tape_sections(&self) -> &[TapeSection] {
        &self.ok_tape_sections
    }

    /// Skipped tests and statistics, with the reason
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Consume the assessor into the outcome of the run
    pub fn into_outcome(self) -> AssessmentOutcome {
        AssessmentOutcome {
            tape_id: self.info.tape_id().to_string(),
            tape_section: self.info.tape_section(),
            reports: self.quality_reports,
            ok_sections: self.ok_tape_sections,
            diagnostics: self.diagnostics,
        }
    }

    fn report(&self, test_type: TestType, fails: Vec<QualityParameterInfo>) -> QualityReport {
        QualityReport::new(self.info.tape_id(), test_type, fails)
    }

    fn skip(&mut self, test_type: TestType, error: AssessmentError) {
        log::warn!(
            "{} not evaluated for tape {}: {}",
            test_type.name(),
            self.info.tape_id(),
            error
        );
        self.diagnostics
            .push(format!("{} not evaluated: {}", test_type.name(), error));
    }
}

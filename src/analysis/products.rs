//! Catalog of tape products
//!
//! The built-in catalog holds the standard products and is built once per
//! process. Catalogs can also be loaded from JSON, keyed by product name.
//!
//! # Example
//!
//! ```
//! use tape_quality::analysis::products::{ProductCatalog, SUPERLINK_PHASE};
//!
//! let spec = ProductCatalog::builtin().get(SUPERLINK_PHASE).unwrap();
//! assert_eq!(spec.min_average, Some(135.0));
//! ```

use super::specs::{TapeSpecs, WidthTolerance};
use crate::error::AssessmentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// SuperLink phase conductor tape
pub const SUPERLINK_PHASE: &str = "superlink_phase";
/// SuperLink neutral conductor tape
pub const SUPERLINK_NEUTRAL: &str = "superlink_neutral";
/// SuperLink phase tape, short test lengths
pub const SUPERLINK_PHASE_TEST: &str = "superlink_phase_test";
/// Standard tape, minimum value only
pub const STANDARD1: &str = "standard1";
/// Standard tape with average requirement
pub const STANDARD2: &str = "standard2";
/// Standard tape with average and drop-out requirements
pub const STANDARD3: &str = "standard3";

/// SuperLink drop-out width curve (mm at a given current in A)
const SUPERLINK_DROPOUT_WIDTH: WidthTolerance = WidthTolerance::Exponential {
    a: 1.43587,
    b: 0.027726,
};

/// Immutable name → product table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog {
    products: BTreeMap<String, TapeSpecs>,
}

impl ProductCatalog {
    /// Catalog from explicit entries
    pub fn new(products: impl IntoIterator<Item = (String, TapeSpecs)>) -> Self {
        Self {
            products: products.into_iter().collect(),
        }
    }

    /// Standard products, built on first use
    pub fn builtin() -> &'static ProductCatalog {
        static CATALOG: OnceLock<ProductCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            log::debug!("Building built-in product catalog");
            Self::new(builtin_products())
        })
    }

    /// Load a catalog from a JSON object mapping names to specs
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::ConfigError` if the JSON is malformed or a
    /// spec has a non-positive width or negative minimum tape length.
    pub fn from_json(json: &str) -> Result<Self, AssessmentError> {
        let catalog: ProductCatalog = serde_json::from_str(json)?;
        for (name, spec) in &catalog.products {
            if spec.width.is_nan() || spec.width <= 0.0 {
                return Err(AssessmentError::ConfigError(format!(
                    "Product {} has non-positive width {}",
                    name, spec.width
                )));
            }
            if spec.min_tape_length < 0.0 {
                return Err(AssessmentError::ConfigError(format!(
                    "Product {} has negative minimum tape length {}",
                    name, spec.min_tape_length
                )));
            }
        }
        log::debug!("Loaded {} products", catalog.products.len());
        Ok(catalog)
    }

    /// Spec of product `name`
    pub fn get(&self, name: &str) -> Option<&TapeSpecs> {
        self.products.get(name)
    }

    /// Product names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True if the catalog has no products
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn superlink(width: f64, min_tape_length: f64, min_average: f64, description: &str) -> TapeSpecs {
    TapeSpecs {
        width,
        min_tape_length,
        min_value: 100.0,
        dropout_value: Some(20.0),
        dropout_width_fn: Some(SUPERLINK_DROPOUT_WIDTH),
        width_from_true_baseline: false,
        min_average: Some(min_average),
        averaging_length: Some(1.0),
        max_scatter: None,
        description: description.to_string(),
    }
}

fn standard(
    min_average: Option<f64>,
    averaging_length: Option<f64>,
    dropout: Option<(f64, WidthTolerance)>,
    description: &str,
) -> TapeSpecs {
    TapeSpecs {
        width: 12.0,
        min_tape_length: 25.0,
        min_value: 500.0,
        dropout_value: dropout.map(|(value, _)| value),
        dropout_width_fn: dropout.map(|(_, width)| width),
        width_from_true_baseline: true,
        min_average,
        averaging_length,
        max_scatter: None,
        description: description.to_string(),
    }
}

fn builtin_products() -> Vec<(String, TapeSpecs)> {
    vec![
        (
            SUPERLINK_PHASE.to_string(),
            superlink(3.0, 190.0, 135.0, "SuperLink Phase"),
        ),
        (
            SUPERLINK_NEUTRAL.to_string(),
            superlink(6.0, 190.0, 180.0, "SuperLink Neutral"),
        ),
        (
            SUPERLINK_PHASE_TEST.to_string(),
            superlink(3.0, 50.0, 135.0, "SuperLink Phase"),
        ),
        (
            STANDARD1.to_string(),
            standard(None, None, None, "Standard Tape 1"),
        ),
        (
            STANDARD2.to_string(),
            standard(Some(700.0), Some(20.0), None, "Standard Tape 2"),
        ),
        (
            STANDARD3.to_string(),
            standard(
                Some(700.0),
                Some(20.0),
                Some((150.0, WidthTolerance::Constant { width: 20.0 })),
                "Standard Tape 3",
            ),
        ),
    ]
}

//! Assessment and result modules
//!
//! Turns quality features into pass/fail decisions:
//! - Quality information (features of one tape)
//! - Product specifications and catalog
//! - Thresholds and the quality assessor
//! - Defect-aware section splitting
//! - Result types

pub mod assessor;
pub mod information;
pub mod products;
pub mod result;
pub mod sections;
pub mod specs;
pub mod threshold;

//! Feature extraction modules
//!
//! This module contains the quality features computed on a tape:
//! - Piecewise statistics (average and scatter)
//! - Drop-out detection (local minima + half-maximum width)

pub mod peaks;
pub mod statistics;

//! Measurement input
//!
//! Position-indexed critical-current samples, already parsed by the caller.

pub mod measurement;

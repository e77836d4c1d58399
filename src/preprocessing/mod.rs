//! Measurement preprocessing modules
//!
//! Locates the part of a measurement that lies on the tape.

pub mod tape_section;

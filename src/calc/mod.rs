//! Calculation engine shared by the CO2 calculator and the ROI simulator.
//!
//! Everything here is a small, pure function so that both front-ends (CLI and
//! TUI) and the tests exercise exactly the same formulas.

pub mod emissions;
pub mod input;
pub mod roi;

pub use input::{accepts_numeric_text, parse_number, parse_or_zero};

//! Domain types used throughout the toolkit.
//!
//! This module defines:
//!
//! - calculator inputs (`ShipmentText`, `ShipmentInput`, `RoiText`, `RoiInput`)
//! - calculator outputs (`EmissionsResult`, `BaselineResult`, `SavingsProjection`, ...)
//! - intervention categories and their effectiveness ranges
//! - solution catalog records (`Solution`, `SolutionFilter`)

pub mod types;

pub use types::*;

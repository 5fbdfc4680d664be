//! Reporting utilities: formatted terminal output for both calculators and the catalog.

pub mod format;

pub use format::*;

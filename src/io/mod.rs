//! Input/output helpers.
//!
//! - result exports to CSV (`export`)
//! - portable result JSON read/write (`result`)
//!
//! Catalog CSV ingest lives in `crate::catalog`.

pub mod export;
pub mod result;

pub use export::*;
pub use result::*;

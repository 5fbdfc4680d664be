//! Vendor solutions catalog.
//!
//! - CSV ingest + row validation (`ingest`)
//! - comparator-style filtering and display helpers (`filter`)

pub mod filter;
pub mod ingest;

pub use filter::*;
pub use ingest::*;

//! `return-toolkit` library crate.
//!
//! The binary (`rtk`) is a thin wrapper around this library so that:
//!
//! - the calculators are testable without spawning processes
//! - the CLI and the TUI share one implementation of every formula
//! - host state (forms) stays separate from the pure calculation code

pub mod app;
pub mod calc;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod debug;
pub mod domain;
pub mod error;
pub mod form;
pub mod io;
pub mod plot;
pub mod report;
pub mod tui;

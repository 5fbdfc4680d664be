//! Command-line parsing for the return-reduction toolkit.
//!
//! Argument parsing lives here; dispatch lives in `crate::app`. Numeric fields
//! are taken as text so the CLI applies the same coercion and validation rules
//! as the interactive forms.

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};

use crate::catalog::{CATEGORIES, COMPLEXITIES, COSTS, PRIVACY_LEVELS};
use crate::domain::DEFAULT_COST_PER_RETURN;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rtk", version, about = "Fashion e-commerce return reduction toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate the CO2e footprint of one shipment and its return.
    Co2(Co2Args),
    /// Simulate savings from return-reduction technology.
    Roi(RoiArgs),
    /// List and filter the solution catalog.
    Solutions(SolutionsArgs),
    /// Print a result JSON written by `--json`.
    Show(ShowArgs),
    /// Launch the interactive TUI.
    Tui,
}

/// Options for the CO2 calculator. Unparseable values count as 0.
#[derive(Debug, Parser, Clone)]
pub struct Co2Args {
    /// Initial shipment weight (kg).
    #[arg(long, default_value = "6", allow_hyphen_values = true)]
    pub initial_weight: String,

    /// Return shipment weight (kg).
    #[arg(long, default_value = "4", allow_hyphen_values = true)]
    pub return_weight: String,

    /// One-way distance (km).
    #[arg(long, default_value = "125", allow_hyphen_values = true)]
    pub distance: String,

    /// Cardboard box weight (kg).
    #[arg(long, default_value = "0.291", allow_hyphen_values = true)]
    pub cardboard_weight: String,

    /// Bubble wrap weight (kg).
    #[arg(long, default_value = "0.044", allow_hyphen_values = true)]
    pub bubble_wrap_weight: String,

    /// Leave out the return leg (and its packaging).
    #[arg(long)]
    pub no_return: bool,

    /// Render the breakdown as a terminal bar.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Export the result to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Write the result as JSON.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Write a Markdown debug bundle of the calculation.
    #[arg(long)]
    pub debug: bool,
}

/// Options for the ROI simulator.
#[derive(Debug, Parser, Clone)]
pub struct RoiArgs {
    /// Average monthly online orders.
    #[arg(long, allow_hyphen_values = true)]
    pub monthly_orders: String,

    /// Average order value.
    #[arg(long, allow_hyphen_values = true)]
    pub avg_order_value: String,

    /// Current average return rate (%).
    #[arg(long, allow_hyphen_values = true)]
    pub return_rate: String,

    /// Estimated cost per return.
    #[arg(long, default_value = DEFAULT_COST_PER_RETURN, allow_hyphen_values = true)]
    pub cost_per_return: String,

    /// Catalog CSV; adds one projection per solution with a published reduction rate.
    #[arg(long, value_name = "CSV")]
    pub solutions: Option<PathBuf>,

    /// Render monthly savings ranges as terminal bars.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Export projections to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Write the result as JSON.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Write a Markdown debug bundle of the calculation.
    #[arg(long)]
    pub debug: bool,
}

/// Catalog listing options. Repeated `--category` flags match any of them.
#[derive(Debug, Parser, Clone)]
pub struct SolutionsArgs {
    /// Catalog CSV (defaults to `RTK_SOLUTIONS_CSV`).
    #[arg(long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    #[arg(long, value_parser = PossibleValuesParser::new(CATEGORIES))]
    pub category: Vec<String>,

    #[arg(long, value_parser = PossibleValuesParser::new(COMPLEXITIES))]
    pub complexity: Option<String>,

    #[arg(long, value_parser = PossibleValuesParser::new(COSTS))]
    pub cost: Option<String>,

    #[arg(long, value_parser = PossibleValuesParser::new(PRIVACY_LEVELS))]
    pub privacy: Option<String>,
}

#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    /// Result JSON produced by `rtk co2 --json` or `rtk roi --json`.
    #[arg(value_name = "JSON")]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn co2_defaults_match_form_defaults() {
        let cli = Cli::parse_from(["rtk", "co2"]);
        let Command::Co2(args) = cli.command else {
            panic!("expected co2");
        };
        assert_eq!(args.initial_weight, "6");
        assert_eq!(args.cardboard_weight, "0.291");
        assert!(!args.no_return);
    }

    #[test]
    fn roi_accepts_negative_text_for_validation() {
        let cli = Cli::parse_from([
            "rtk",
            "roi",
            "--monthly-orders",
            "-5",
            "--avg-order-value",
            "85",
            "--return-rate",
            "30",
        ]);
        let Command::Roi(args) = cli.command else {
            panic!("expected roi");
        };
        assert_eq!(args.monthly_orders, "-5");
        assert_eq!(args.cost_per_return, "12.50");
    }

    #[test]
    fn solutions_rejects_unknown_filter_values() {
        assert!(Cli::try_parse_from(["rtk", "solutions", "--cost", "$$$$$"]).is_err());
        let cli = Cli::try_parse_from([
            "rtk",
            "solutions",
            "--category",
            "VTO/AR",
            "--category",
            "Return Management",
        ])
        .unwrap();
        let Command::Solutions(args) = cli.command else {
            panic!("expected solutions");
        };
        assert_eq!(args.category, vec!["VTO/AR", "Return Management"]);
    }
}

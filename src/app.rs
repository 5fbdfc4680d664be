//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads settings from `.env` / environment
//! - parses CLI arguments
//! - runs a calculator or lists the catalog
//! - prints reports/plots
//! - writes optional exports and debug bundles

use std::path::Path;

use clap::Parser;

use crate::calc::{emissions, roi};
use crate::catalog::{CatalogData, filter_solutions, load_solutions};
use crate::cli::{Co2Args, Command, RoiArgs, ShowArgs, SolutionsArgs};
use crate::config::Settings;
use crate::debug::{BundleKind, render_emissions_debug, render_roi_debug, write_debug_bundle};
use crate::domain::{NamedProjection, ResultPayload, RoiText, ShipmentText, SolutionFilter};
use crate::error::AppError;
use crate::io::{new_result_file, read_result_json, write_emissions_csv, write_result_json, write_roi_csv};
use crate::report::{
    format_emissions_report, format_roi_report, format_solutions_table, format_validation_error,
};

/// Entry point for the `rtk` binary.
pub fn run() -> Result<(), AppError> {
    // `rtk` alone opens the TUI. Clap requires a subcommand name, so rewrite
    // argv before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let settings = Settings::from_env();

    match cli.command {
        Command::Co2(args) => handle_co2(args, &settings),
        Command::Roi(args) => handle_roi(args, &settings),
        Command::Solutions(args) => handle_solutions(args, &settings),
        Command::Show(args) => handle_show(args, &settings),
        Command::Tui => crate::tui::run(settings),
    }
}

fn handle_co2(args: Co2Args, settings: &Settings) -> Result<(), AppError> {
    let text = shipment_text_from_args(&args);
    let input = emissions::parse_shipment(&text);
    let result = emissions::compute(&input);
    let breakdown = emissions::breakdown(&result);

    println!("{}", format_emissions_report(&input, &result, &breakdown));
    if args.plot {
        println!("{}", crate::plot::render_breakdown_bar(&breakdown, args.width));
    }

    if let Some(path) = &args.export {
        write_emissions_csv(path, &input, &result, &breakdown)?;
    }
    if let Some(path) = &args.json {
        let file = new_result_file(ResultPayload::Emissions {
            input,
            result,
            breakdown,
        });
        write_result_json(path, &file)?;
    }
    if args.debug {
        let md = render_emissions_debug(Some(&text), &input, &result, &breakdown);
        let path = write_debug_bundle(&settings.debug_dir, BundleKind::Co2, &md)?;
        eprintln!("Wrote debug bundle: {}", path.display());
    }

    Ok(())
}

fn handle_roi(args: RoiArgs, settings: &Settings) -> Result<(), AppError> {
    let text = roi_text_from_args(&args);

    let input = match roi::validate(&text) {
        Ok(input) => input,
        Err(err) => {
            print!("{}", format_validation_error(&err));
            if args.debug {
                let md = render_roi_debug(&text, Err(&err));
                let path = write_debug_bundle(&settings.debug_dir, BundleKind::Roi, &md)?;
                eprintln!("Wrote debug bundle: {}", path.display());
            }
            return Err(err.into());
        }
    };
    let outcome = roi::compute_validated(&input);

    let catalog_path = args.solutions.as_deref().or(settings.solutions_csv.as_deref());
    let solutions: Vec<NamedProjection> = match catalog_path {
        Some(path) => {
            let catalog = load_catalog(path)?;
            catalog
                .solutions
                .iter()
                .filter_map(|s| roi::project_solution(s, &outcome.baseline))
                .collect()
        }
        None => Vec::new(),
    };

    println!("{}", format_roi_report(&outcome, &solutions, &settings.currency));
    if args.plot {
        println!("{}", crate::plot::render_savings_ranges(&outcome, args.width));
    }

    if let Some(path) = &args.export {
        write_roi_csv(path, &outcome, &solutions)?;
    }
    if args.debug {
        let md = render_roi_debug(&text, Ok(&outcome));
        let path = write_debug_bundle(&settings.debug_dir, BundleKind::Roi, &md)?;
        eprintln!("Wrote debug bundle: {}", path.display());
    }
    if let Some(path) = &args.json {
        let file = new_result_file(ResultPayload::Roi {
            input,
            outcome,
            solutions,
        });
        write_result_json(path, &file)?;
    }

    Ok(())
}

fn handle_solutions(args: SolutionsArgs, settings: &Settings) -> Result<(), AppError> {
    let Some(path) = args.file.as_deref().or(settings.solutions_csv.as_deref()) else {
        return Err(AppError::new(
            2,
            "No solutions CSV given. Pass --file or set RTK_SOLUTIONS_CSV.",
        ));
    };
    let catalog = load_catalog(path)?;

    let filter = SolutionFilter {
        categories: args.category,
        complexity: args.complexity,
        cost: args.cost,
        privacy: args.privacy,
    };
    let matched = filter_solutions(&catalog.solutions, &filter);

    print!("{}", format_solutions_table(&matched));
    Ok(())
}

fn handle_show(args: ShowArgs, settings: &Settings) -> Result<(), AppError> {
    let file = read_result_json(&args.path)?;
    println!("{} result generated at {}", file.tool, file.generated_at);

    match file.payload {
        ResultPayload::Emissions {
            input,
            result,
            breakdown,
        } => println!("{}", format_emissions_report(&input, &result, &breakdown)),
        ResultPayload::Roi {
            outcome, solutions, ..
        } => println!("{}", format_roi_report(&outcome, &solutions, &settings.currency)),
    }
    Ok(())
}

/// Load a catalog and report skipped rows on stderr.
fn load_catalog(path: &Path) -> Result<CatalogData, AppError> {
    let catalog = load_solutions(path)?;
    for err in &catalog.row_errors {
        eprintln!(
            "warning: skipped catalog line {} ({}): {}",
            err.line,
            err.name.as_deref().unwrap_or("unnamed"),
            err.message
        );
    }
    Ok(catalog)
}

pub fn shipment_text_from_args(args: &Co2Args) -> ShipmentText {
    ShipmentText {
        initial_weight: args.initial_weight.clone(),
        return_weight: args.return_weight.clone(),
        distance: args.distance.clone(),
        cardboard_weight: args.cardboard_weight.clone(),
        bubble_wrap_weight: args.bubble_wrap_weight.clone(),
        include_return: !args.no_return,
    }
}

pub fn roi_text_from_args(args: &RoiArgs) -> RoiText {
    RoiText {
        monthly_orders: args.monthly_orders.clone(),
        avg_order_value: args.avg_order_value.clone(),
        current_return_rate: args.return_rate.clone(),
        cost_per_return: args.cost_per_return.clone(),
    }
}

/// Rewrite argv so a bare `rtk` becomes `rtk tui`; any other argv is left as is.
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    if argv.len() <= 1 {
        argv.push("tui".to_string());
    }
    argv
}

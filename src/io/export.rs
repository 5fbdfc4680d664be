//! Export calculation results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::{EmissionsBreakdown, EmissionsResult, InterventionCategory, NamedProjection, RoiOutcome, ShipmentInput};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct EmissionsRow {
    initial_weight_kg: f64,
    return_weight_kg: f64,
    distance_km: f64,
    cardboard_weight_kg: f64,
    bubble_wrap_weight_kg: f64,
    include_return: bool,
    initial_transport_kg: f64,
    return_transport_kg: f64,
    packaging_kg: f64,
    total_kg: f64,
    tree_absorption_days: f64,
    initial_transport_pct: f64,
    return_transport_pct: f64,
    packaging_pct: f64,
}

#[derive(Debug, Serialize)]
struct ProjectionRow<'a> {
    source: &'a str,
    name: &'a str,
    monthly_returned_orders: f64,
    monthly_processing_cost: f64,
    monthly_revenue_lost: f64,
    new_rate_low_pct: f64,
    new_rate_high_pct: f64,
    monthly_savings_low: f64,
    monthly_savings_high: f64,
    annual_savings_low: f64,
    annual_savings_high: f64,
}

/// Write one emissions calculation to a CSV file.
pub fn write_emissions_csv(
    path: &Path,
    input: &ShipmentInput,
    result: &EmissionsResult,
    breakdown: &EmissionsBreakdown,
) -> Result<(), AppError> {
    let file = create(path)?;
    write_emissions_to(file, input, result, breakdown)
}

fn write_emissions_to<W: Write>(
    sink: W,
    input: &ShipmentInput,
    result: &EmissionsResult,
    breakdown: &EmissionsBreakdown,
) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(sink);
    writer
        .serialize(EmissionsRow {
            initial_weight_kg: input.initial_weight_kg,
            return_weight_kg: input.return_weight_kg,
            distance_km: input.distance_km,
            cardboard_weight_kg: input.cardboard_weight_kg,
            bubble_wrap_weight_kg: input.bubble_wrap_weight_kg,
            include_return: input.include_return,
            initial_transport_kg: result.initial_transport_emissions_kg,
            return_transport_kg: result.return_transport_emissions_kg,
            packaging_kg: result.packaging_emissions_kg,
            total_kg: result.total_emissions_kg,
            tree_absorption_days: result.tree_absorption_days,
            initial_transport_pct: breakdown.initial_transport_pct,
            return_transport_pct: breakdown.return_transport_pct,
            packaging_pct: breakdown.packaging_pct,
        })
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
}

/// Write ROI projections (categories, then solutions) to a CSV file.
pub fn write_roi_csv(path: &Path, outcome: &RoiOutcome, solutions: &[NamedProjection]) -> Result<(), AppError> {
    let file = create(path)?;
    write_roi_to(file, outcome, solutions)
}

fn write_roi_to<W: Write>(sink: W, outcome: &RoiOutcome, solutions: &[NamedProjection]) -> Result<(), AppError> {
    let b = &outcome.baseline;
    let mut writer = csv::Writer::from_writer(sink);

    let category_rows = InterventionCategory::ALL
        .into_iter()
        .filter_map(|c| outcome.projections.get(&c).map(|p| ("category", c.display_name(), p)));
    let solution_rows = solutions
        .iter()
        .map(|s| ("solution", s.name.as_str(), &s.projection));

    for (source, name, p) in category_rows.chain(solution_rows) {
        writer
            .serialize(ProjectionRow {
                source,
                name,
                monthly_returned_orders: b.monthly_returned_orders,
                monthly_processing_cost: b.monthly_processing_cost,
                monthly_revenue_lost: b.monthly_revenue_lost,
                new_rate_low_pct: p.new_rate_low,
                new_rate_high_pct: p.new_rate_high,
                monthly_savings_low: p.monthly_low,
                monthly_savings_high: p.monthly_high,
                annual_savings_low: p.annual_low,
                annual_savings_high: p.annual_high,
            })
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
}

fn create(path: &Path) -> Result<std::fs::File, AppError> {
    std::fs::File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))
}

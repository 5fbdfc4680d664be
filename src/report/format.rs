//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the calculation code stays clean and testable
//! - output changes are localized (the TUI reuses the value formatters)

use crate::calc::emissions::tree_absorption_label;
use crate::catalog::format_reduction_rate;
use crate::domain::{
    EmissionsBreakdown, EmissionsResult, InterventionCategory, NamedProjection, RoiOutcome, SavingsProjection,
    ShipmentInput, Solution,
};
use crate::error::ValidationError;

/// Currency with two decimals, or `N/A` for a missing/NaN value.
pub fn format_currency(value: Option<f64>, symbol: &str) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{symbol}{v:.2}"),
        _ => "N/A".to_string(),
    }
}

/// Percentage with `decimals` places, or `N/A`.
pub fn format_percent(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{v:.decimals$}%"),
        _ => "N/A".to_string(),
    }
}

/// Format a CO2 calculation.
pub fn format_emissions_report(
    input: &ShipmentInput,
    result: &EmissionsResult,
    breakdown: &EmissionsBreakdown,
) -> String {
    let mut out = String::new();

    out.push_str("=== rtk - CO2 Emissions Calculator ===\n");
    let return_leg = if input.include_return {
        format!("{:.2}kg", input.return_weight_kg)
    } else {
        "excluded".to_string()
    };
    out.push_str(&format!(
        "Shipment: initial={:.2}kg | return={return_leg} | distance={:.0}km | cardboard={:.3}kg | bubble wrap={:.3}kg\n",
        input.initial_weight_kg, input.distance_km, input.cardboard_weight_kg, input.bubble_wrap_weight_kg,
    ));

    out.push_str("\nEmissions (kg CO2e):\n");
    out.push_str(&format!("  {:<22} {:>10.2}\n", "Initial Transport", result.initial_transport_emissions_kg));
    if input.include_return {
        out.push_str(&format!("  {:<22} {:>10.2}\n", "Return Transport", result.return_transport_emissions_kg));
    }
    out.push_str(&format!("  {:<22} {:>10.2}\n", "Packaging Materials", result.packaging_emissions_kg));
    out.push_str(&format!("  {:<22} {:>10.2}\n", "Total", result.total_emissions_kg));

    out.push_str(&format!(
        "\nAn average tree absorbs this in: {}\n",
        tree_absorption_label(result.tree_absorption_days)
    ));

    out.push_str("\nBreakdown:\n");
    out.push_str(&format!(
        "  {:<22} {:>8}\n",
        "Initial Transport",
        format_percent(Some(breakdown.initial_transport_pct), 1)
    ));
    if input.include_return {
        out.push_str(&format!(
            "  {:<22} {:>8}\n",
            "Return Transport",
            format_percent(Some(breakdown.return_transport_pct), 1)
        ));
    }
    out.push_str(&format!(
        "  {:<22} {:>8}\n",
        "Packaging",
        format_percent(Some(breakdown.packaging_pct), 1)
    ));

    out
}

/// Format an ROI simulation: baseline, categories, and optional per-solution rows.
pub fn format_roi_report(outcome: &RoiOutcome, solutions: &[NamedProjection], currency: &str) -> String {
    let mut out = String::new();
    let b = &outcome.baseline;

    out.push_str("=== rtk - ROI Simulator ===\n");
    out.push_str("\nBaseline Summary:\n");
    out.push_str(&format!("  Est. Monthly Returned Orders: {:.0}\n", b.monthly_returned_orders));
    out.push_str(&format!(
        "  Est. Monthly Return Processing Cost: {}\n",
        format_currency(Some(b.monthly_processing_cost), currency)
    ));
    out.push_str(&format!(
        "  Est. Monthly Revenue Lost on Returns: {}\n",
        format_currency(Some(b.monthly_revenue_lost), currency)
    ));

    out.push_str("\nSimulation Results (Potential Savings):\n");
    for category in InterventionCategory::ALL {
        let Some(p) = outcome.projections.get(&category) else {
            continue;
        };
        let range = category.effectiveness();
        out.push_str(&format!(
            "\n{} (reduction {:.0}% - {:.0}%)\n",
            category.display_name(),
            range.low * 100.0,
            range.high * 100.0
        ));
        out.push_str(&format_projection_lines(p, currency));
    }

    if !solutions.is_empty() {
        out.push_str("\nPer-solution projections:\n");
        out.push_str(&format_solution_projections(solutions, currency));
    }

    out.push_str(
        "\nIndicative figures for informational purposes only; not financial advice or a guarantee of savings.\n",
    );
    out
}

/// The three "Est. ..." lines of one projection.
pub fn format_projection_lines(p: &SavingsProjection, currency: &str) -> String {
    format!(
        "  Est. New Return Rate: {} - {}\n  Est. Monthly Savings: {} - {}\n  Est. Annual Savings: {} - {}\n",
        format_percent(Some(p.new_rate_low), 1),
        format_percent(Some(p.new_rate_high), 1),
        format_currency(Some(p.monthly_low), currency),
        format_currency(Some(p.monthly_high), currency),
        format_currency(Some(p.annual_low), currency),
        format_currency(Some(p.annual_high), currency),
    )
}

fn format_solution_projections(rows: &[NamedProjection], currency: &str) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<20} {:<20} {:>15} {:>23} {:>25}\n",
            "solution", "category", "new rate", "monthly savings", "annual savings"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<20} {:-<20} {:-<15} {:-<23} {:-<25}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    for r in rows {
        let p = &r.projection;
        out.push_str(
            format!(
                "{:<20} {:<20} {:>15} {:>23} {:>25}\n",
                truncate(&r.name, 20),
                truncate(&r.category, 20),
                format!(
                    "{}-{}",
                    format_percent(Some(p.new_rate_low), 1),
                    format_percent(Some(p.new_rate_high), 1)
                ),
                format!(
                    "{}-{}",
                    format_currency(Some(p.monthly_low), currency),
                    format_currency(Some(p.monthly_high), currency)
                ),
                format!(
                    "{}-{}",
                    format_currency(Some(p.annual_low), currency),
                    format_currency(Some(p.annual_high), currency)
                ),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

pub fn format_validation_error(err: &ValidationError) -> String {
    let mut out = String::from("Invalid input values provided:\n");
    for v in &err.violations {
        out.push_str(&format!("  - {}: {}\n", v.field.label(), v.message));
    }
    out
}

/// Format the catalog as a table.
pub fn format_solutions_table(solutions: &[Solution]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<20} {:<20} {:>12} {:<40} {:<6} {:<8}\n",
            "name", "category", "reduction", "complexity", "cost", "privacy"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<20} {:-<20} {:-<12} {:-<40} {:-<6} {:-<8}\n", "", "", "", "", "", "").trim_end());
    out.push('\n');

    for s in solutions {
        out.push_str(
            format!(
                "{:<20} {:<20} {:>12} {:<40} {:<6} {:<8}\n",
                truncate(&s.name, 20),
                truncate(&s.category, 20),
                format_reduction_rate(s.reduction_rate_low_pct, s.reduction_rate_high_pct),
                truncate(s.integration_complexity.as_deref().unwrap_or(""), 40),
                s.indicative_cost.as_deref().unwrap_or(""),
                s.privacy_concern_level.as_deref().unwrap_or(""),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out.push_str(&format!("{} solution(s)\n", solutions.len()));
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::{emissions, roi};
    use crate::domain::RoiText;

    fn reference_roi() -> RoiOutcome {
        roi::compute(&RoiText {
            monthly_orders: "1000".to_string(),
            avg_order_value: "85".to_string(),
            current_return_rate: "30".to_string(),
            cost_per_return: "12.50".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn currency_and_percent_handle_missing_values() {
        assert_eq!(format_currency(Some(3750.0), "€"), "€3750.00");
        assert_eq!(format_currency(None, "€"), "N/A");
        assert_eq!(format_currency(Some(f64::NAN), "€"), "N/A");
        assert_eq!(format_percent(Some(22.5), 1), "22.5%");
        assert_eq!(format_percent(Some(27.0), 0), "27%");
        assert_eq!(format_percent(None, 1), "N/A");
    }

    #[test]
    fn emissions_report_shows_rounded_components() {
        let input = emissions::parse_shipment(&Default::default());
        let result = emissions::compute(&input);
        let report = format_emissions_report(&input, &result, &emissions::breakdown(&result));
        assert!(report.contains("0.44"));
        assert!(report.contains("2.02"));
        assert!(report.contains("2.76"));
        assert!(report.contains("Return Transport"));
        assert!(report.contains("(≈ 1 month)"));
    }

    #[test]
    fn emissions_report_omits_return_leg_when_excluded() {
        let input = ShipmentInput {
            include_return: false,
            ..emissions::parse_shipment(&Default::default())
        };
        let result = emissions::compute(&input);
        let report = format_emissions_report(&input, &result, &emissions::breakdown(&result));
        assert!(!report.contains("Return Transport"));
        assert!(report.contains("return=excluded"));
    }

    #[test]
    fn roi_report_lists_baseline_and_categories() {
        let report = format_roi_report(&reference_roi(), &[], "€");
        assert!(report.contains("Est. Monthly Returned Orders: 300"));
        assert!(report.contains("€3750.00"));
        assert!(report.contains("€25500.00"));
        assert!(report.contains("Size Recommendation (reduction 10% - 25%)"));
        assert!(report.contains("22.5% - 27.0%"));
        assert!(report.contains("€375.00 - €937.50"));
        assert!(report.contains("€4500.00 - €11250.00"));
        assert!(report.contains("VTO / AR"));
        assert!(report.contains("Return Management"));
        assert!(!report.contains("Per-solution"));
    }

    #[test]
    fn validation_error_lists_fields() {
        let err = roi::compute(&RoiText::default()).unwrap_err();
        let text = format_validation_error(&err);
        assert!(text.contains("Average Monthly Online Orders"));
        assert!(text.contains("Average Order Value"));
        assert!(!text.contains("Cost per Return"));
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate("Reactive Reality", 10), "Reactive .");
        assert_eq!(truncate("Faslet", 10), "Faslet");
    }
}

//! Debug bundle writer for inspecting a calculation step by step.
//!
//! A bundle is a Markdown file recording the raw form text, the coerced
//! inputs, the constants in play, and every intermediate value.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::calc::emissions::{
    BUBBLE_WRAP_EMISSIONS_PER_KG, CARDBOARD_EMISSIONS_PER_KG, TRANSPORT_EMISSIONS_PER_KM_PER_KG,
    TREE_ABSORPTION_PER_YEAR, packaging_emissions_once,
};
use crate::domain::{
    EmissionsBreakdown, EmissionsResult, InterventionCategory, RoiOutcome, RoiText, ShipmentField, ShipmentInput,
    ShipmentText,
};
use crate::error::{AppError, ValidationError};

/// Which calculator a bundle describes (used in the file name).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleKind {
    Co2,
    Roi,
}

impl BundleKind {
    fn slug(self) -> &'static str {
        match self {
            BundleKind::Co2 => "co2",
            BundleKind::Roi => "roi",
        }
    }
}

/// Write `contents` to a timestamped file under `dir` and return its path.
pub fn write_debug_bundle(dir: &Path, kind: BundleKind, contents: &str) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("rtk_debug_{}_{ts}.md", kind.slug()));

    let mut file = File::create(&path)
        .map_err(|e| AppError::new(4, format!("Failed to create debug file: {e}")))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| AppError::new(4, format!("Failed to write debug bundle: {e}")))?;

    Ok(path)
}

pub fn render_emissions_debug(
    text: Option<&ShipmentText>,
    input: &ShipmentInput,
    result: &EmissionsResult,
    breakdown: &EmissionsBreakdown,
) -> String {
    let mut out = header("CO2 emissions");

    if let Some(text) = text {
        out.push_str("\n## Form text\n");
        out.push_str("| field | text | value |\n| - | - | - |\n");
        for field in ShipmentField::ALL {
            out.push_str(&format!(
                "| {} | `{}` | {} |\n",
                field.label(),
                text.field(field),
                shipment_value(input, field)
            ));
        }
        out.push_str(&format!("| Include return | `{}` | {} |\n", text.include_return, input.include_return));
    }

    out.push_str("\n## Constants\n");
    out.push_str(&format!("- transport: {TRANSPORT_EMISSIONS_PER_KM_PER_KG} per km per kg (/1000)\n"));
    out.push_str(&format!("- cardboard: {CARDBOARD_EMISSIONS_PER_KG} per kg\n"));
    out.push_str(&format!("- bubble wrap: {BUBBLE_WRAP_EMISSIONS_PER_KG} per kg\n"));
    out.push_str(&format!("- tree absorption: {TREE_ABSORPTION_PER_YEAR} per year\n"));

    let once = packaging_emissions_once(input.cardboard_weight_kg, input.bubble_wrap_weight_kg);
    out.push_str("\n## Intermediate values (kg CO2e)\n");
    out.push_str(&format!("- initial transport: {:.6}\n", result.initial_transport_emissions_kg));
    out.push_str(&format!("- return transport: {:.6}\n", result.return_transport_emissions_kg));
    out.push_str(&format!("- packaging (one leg): {once:.6}\n"));
    out.push_str(&format!(
        "- packaging (x{}): {:.6}\n",
        if input.include_return { 2 } else { 1 },
        result.packaging_emissions_kg
    ));
    out.push_str(&format!("- total: {:.6}\n", result.total_emissions_kg));
    out.push_str(&format!("- tree absorption days: {:.3}\n", result.tree_absorption_days));
    out.push_str(&format!(
        "- breakdown: initial {:.3}% | return {:.3}% | packaging {:.3}%\n",
        breakdown.initial_transport_pct, breakdown.return_transport_pct, breakdown.packaging_pct
    ));

    out
}

pub fn render_roi_debug(text: &RoiText, result: Result<&RoiOutcome, &ValidationError>) -> String {
    let mut out = header("ROI simulation");

    out.push_str("\n## Form text\n");
    out.push_str(&format!("- monthly orders: `{}`\n", text.monthly_orders));
    out.push_str(&format!("- average order value: `{}`\n", text.avg_order_value));
    out.push_str(&format!("- current return rate: `{}`\n", text.current_return_rate));
    out.push_str(&format!("- cost per return: `{}`\n", text.cost_per_return));

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            out.push_str("\n## Validation failed\n");
            for v in &err.violations {
                out.push_str(&format!("- {:?}: {}\n", v.field, v.message));
            }
            return out;
        }
    };

    let b = &outcome.baseline;
    out.push_str("\n## Baseline\n");
    out.push_str(&format!("- return rate (decimal): {:.6}\n", b.current_return_rate_decimal));
    out.push_str(&format!("- monthly returned orders: {:.6}\n", b.monthly_returned_orders));
    out.push_str(&format!("- monthly processing cost: {:.6}\n", b.monthly_processing_cost));
    out.push_str(&format!("- monthly revenue lost: {:.6}\n", b.monthly_revenue_lost));

    out.push_str("\n## Projections\n");
    out.push_str("| category | low | high | monthly low | monthly high | annual low | annual high | new rate low | new rate high |\n");
    out.push_str("| - | - | - | - | - | - | - | - | - |\n");
    for category in InterventionCategory::ALL {
        let Some(p) = outcome.projections.get(&category) else {
            continue;
        };
        let r = category.effectiveness();
        out.push_str(&format!(
            "| {} | {:.2} | {:.2} | {:.4} | {:.4} | {:.4} | {:.4} | {:.4} | {:.4} |\n",
            category.display_name(),
            r.low,
            r.high,
            p.monthly_low,
            p.monthly_high,
            p.annual_low,
            p.annual_high,
            p.new_rate_low,
            p.new_rate_high
        ));
    }

    out
}

fn header(title: &str) -> String {
    format!("# rtk debug bundle: {title}\n- generated: {}\n", Local::now().to_rfc3339())
}

fn shipment_value(input: &ShipmentInput, field: ShipmentField) -> f64 {
    match field {
        ShipmentField::InitialWeight => input.initial_weight_kg,
        ShipmentField::ReturnWeight => input.return_weight_kg,
        ShipmentField::Distance => input.distance_km,
        ShipmentField::CardboardWeight => input.cardboard_weight_kg,
        ShipmentField::BubbleWrapWeight => input.bubble_wrap_weight_kg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::{emissions, roi};

    #[test]
    fn emissions_bundle_records_coercion_and_intermediates() {
        let mut text = ShipmentText::default();
        text.distance = "abc".to_string();
        let input = emissions::parse_shipment(&text);
        let result = emissions::compute(&input);
        let md = render_emissions_debug(Some(&text), &input, &result, &emissions::breakdown(&result));

        assert!(md.starts_with("# rtk debug bundle: CO2 emissions"));
        assert!(md.contains("| One-way Distance (km) | `abc` | 0 |"));
        assert!(md.contains("- packaging (x2): 2.018540"));
    }

    #[test]
    fn roi_bundle_lists_violations_without_projections() {
        let text = RoiText::default();
        let err = roi::compute(&text).unwrap_err();
        let md = render_roi_debug(&text, Err(&err));
        assert!(md.contains("## Validation failed"));
        assert!(md.contains("MonthlyOrders"));
        assert!(!md.contains("## Projections"));
    }

    #[test]
    fn bundle_file_is_written_under_dir() {
        let dir = std::env::temp_dir().join(format!("rtk_debug_test_{}", std::process::id()));
        let path = write_debug_bundle(&dir, BundleKind::Roi, "# hello\n").unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("rtk_debug_roi_"));
        assert_eq!(written, "# hello\n");
    }
}

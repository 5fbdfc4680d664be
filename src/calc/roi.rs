//! ROI simulation for return-reduction technologies.
//!
//! Pipeline: raw text -> `validate` -> `baseline` -> one `project_savings` per
//! intervention category. Validation is all-or-nothing: a single bad field
//! blocks the whole calculation and no partial result is produced.

use std::collections::BTreeMap;

use crate::calc::input::parse_number;
use crate::domain::{
    BaselineResult, EffectivenessRange, InterventionCategory, NamedProjection, RoiField, RoiInput, RoiOutcome,
    RoiText, SavingsProjection, Solution,
};
use crate::error::{FieldViolation, ValidationError};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Validate all four fields and collect every violation.
pub fn validate(text: &RoiText) -> Result<RoiInput, ValidationError> {
    let mut violations = Vec::new();

    let monthly_orders = check(text, RoiField::MonthlyOrders, |v| v > 0.0, &mut violations);
    let avg_order_value = check(text, RoiField::AvgOrderValue, |v| v > 0.0, &mut violations);
    let rate = check(
        text,
        RoiField::CurrentReturnRate,
        |v| (0.0..=100.0).contains(&v),
        &mut violations,
    );
    let cost_per_return = check(text, RoiField::CostPerReturn, |v| v >= 0.0, &mut violations);

    match (monthly_orders, avg_order_value, rate, cost_per_return) {
        (Some(monthly_orders), Some(avg_order_value), Some(current_return_rate_percent), Some(cost_per_return))
            if violations.is_empty() =>
        {
            Ok(RoiInput {
                monthly_orders,
                avg_order_value,
                current_return_rate_percent,
                cost_per_return,
            })
        }
        _ => Err(ValidationError { violations }),
    }
}

fn check(
    text: &RoiText,
    field: RoiField,
    rule: impl Fn(f64) -> bool,
    violations: &mut Vec<FieldViolation>,
) -> Option<f64> {
    match parse_number(text.field(field)) {
        Some(v) if rule(v) => Some(v),
        _ => {
            violations.push(FieldViolation {
                field,
                message: violation_message(field).to_string(),
            });
            None
        }
    }
}

fn violation_message(field: RoiField) -> &'static str {
    match field {
        RoiField::MonthlyOrders => "Monthly orders must be a number greater than 0.",
        RoiField::AvgOrderValue => "Average order value must be a number greater than 0.",
        RoiField::CurrentReturnRate => "Current return rate must be a number between 0 and 100.",
        RoiField::CostPerReturn => "Cost per return must be a number of 0 or more.",
    }
}

pub fn baseline(input: &RoiInput) -> BaselineResult {
    let rate_decimal = input.current_return_rate_percent / 100.0;
    let returned = input.monthly_orders * rate_decimal;
    BaselineResult {
        monthly_returned_orders: returned,
        monthly_processing_cost: returned * input.cost_per_return,
        monthly_revenue_lost: returned * input.avg_order_value,
        current_return_rate_decimal: rate_decimal,
    }
}

/// Savings bounds for one effectiveness range.
///
/// The mapping to new rates is inverse: the high reduction bound gives the
/// low new rate.
pub fn project_savings(
    range: EffectivenessRange,
    processing_cost: f64,
    rate_decimal: f64,
) -> SavingsProjection {
    let monthly_low = processing_cost * range.low;
    let monthly_high = processing_cost * range.high;
    SavingsProjection {
        monthly_low,
        monthly_high,
        annual_low: monthly_low * MONTHS_PER_YEAR,
        annual_high: monthly_high * MONTHS_PER_YEAR,
        new_rate_low: rate_decimal * (1.0 - range.high) * 100.0,
        new_rate_high: rate_decimal * (1.0 - range.low) * 100.0,
    }
}

pub fn project_all(baseline: &BaselineResult) -> BTreeMap<InterventionCategory, SavingsProjection> {
    InterventionCategory::ALL
        .into_iter()
        .map(|category| {
            let projection = project_savings(
                category.effectiveness(),
                baseline.monthly_processing_cost,
                baseline.current_return_rate_decimal,
            );
            (category, projection)
        })
        .collect()
}

/// Project savings from a catalog solution's own reduction-rate range.
///
/// `None` when the solution has no usable range.
pub fn project_solution(solution: &Solution, baseline: &BaselineResult) -> Option<NamedProjection> {
    let range = EffectivenessRange::from_percent(solution.reduction_rate_low_pct?, solution.reduction_rate_high_pct?)?;
    Some(NamedProjection {
        name: solution.name.clone(),
        category: solution.category.clone(),
        projection: project_savings(
            range,
            baseline.monthly_processing_cost,
            baseline.current_return_rate_decimal,
        ),
    })
}

/// Run the full estimate from raw form text.
pub fn compute(text: &RoiText) -> Result<RoiOutcome, ValidationError> {
    let input = validate(text)?;
    Ok(compute_validated(&input))
}

pub fn compute_validated(input: &RoiInput) -> RoiOutcome {
    let baseline = baseline(input);
    let projections = project_all(&baseline);
    RoiOutcome { baseline, projections }
}

//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the calculators and forms
//! - exported to JSON/CSV
//! - reloaded later for comparisons

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default `cost_per_return` text restored by an ROI form reset.
pub const DEFAULT_COST_PER_RETURN: &str = "12.50";

/// Raw CO2 form fields, exactly as typed.
///
/// Text rather than numbers so an empty field stays empty while the user edits;
/// coercion to numbers happens only at calculation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentText {
    pub initial_weight: String,
    pub return_weight: String,
    pub distance: String,
    pub cardboard_weight: String,
    pub bubble_wrap_weight: String,
    pub include_return: bool,
}

impl Default for ShipmentText {
    /// A typical apparel parcel: 6 kg out, 4 kg back, 125 km, one box with wrap.
    fn default() -> Self {
        Self {
            initial_weight: "6".to_string(),
            return_weight: "4".to_string(),
            distance: "125".to_string(),
            cardboard_weight: "0.291".to_string(),
            bubble_wrap_weight: "0.044".to_string(),
            include_return: true,
        }
    }
}

impl ShipmentText {
    pub fn field(&self, field: ShipmentField) -> &str {
        match field {
            ShipmentField::InitialWeight => &self.initial_weight,
            ShipmentField::ReturnWeight => &self.return_weight,
            ShipmentField::Distance => &self.distance,
            ShipmentField::CardboardWeight => &self.cardboard_weight,
            ShipmentField::BubbleWrapWeight => &self.bubble_wrap_weight,
        }
    }

    pub fn field_mut(&mut self, field: ShipmentField) -> &mut String {
        match field {
            ShipmentField::InitialWeight => &mut self.initial_weight,
            ShipmentField::ReturnWeight => &mut self.return_weight,
            ShipmentField::Distance => &mut self.distance,
            ShipmentField::CardboardWeight => &mut self.cardboard_weight,
            ShipmentField::BubbleWrapWeight => &mut self.bubble_wrap_weight,
        }
    }
}

/// Numeric text fields of the CO2 form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipmentField {
    InitialWeight,
    ReturnWeight,
    Distance,
    CardboardWeight,
    BubbleWrapWeight,
}

impl ShipmentField {
    pub const ALL: [ShipmentField; 5] = [
        ShipmentField::InitialWeight,
        ShipmentField::ReturnWeight,
        ShipmentField::Distance,
        ShipmentField::CardboardWeight,
        ShipmentField::BubbleWrapWeight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShipmentField::InitialWeight => "Initial Shipment Weight (kg)",
            ShipmentField::ReturnWeight => "Return Shipment Weight (kg)",
            ShipmentField::Distance => "One-way Distance (km)",
            ShipmentField::CardboardWeight => "Cardboard Box Weight (kg)",
            ShipmentField::BubbleWrapWeight => "Bubble Wrap Weight (kg)",
        }
    }
}

/// Coerced CO2 calculator input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentInput {
    pub initial_weight_kg: f64,
    /// Only used when `include_return` is set.
    pub return_weight_kg: f64,
    /// One-way distance; the return leg travels the same distance.
    pub distance_km: f64,
    pub cardboard_weight_kg: f64,
    pub bubble_wrap_weight_kg: f64,
    pub include_return: bool,
}

/// CO2e figures for one shipment (all in kg CO2e).
///
/// `total_emissions_kg` is always the sum of the three components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionsResult {
    pub initial_transport_emissions_kg: f64,
    pub return_transport_emissions_kg: f64,
    pub packaging_emissions_kg: f64,
    pub total_emissions_kg: f64,
    pub tree_absorption_days: f64,
}

/// Share of each component in the total, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionsBreakdown {
    pub initial_transport_pct: f64,
    pub return_transport_pct: f64,
    pub packaging_pct: f64,
}

/// Fields of the ROI form, in display and validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiField {
    MonthlyOrders,
    AvgOrderValue,
    CurrentReturnRate,
    CostPerReturn,
}

impl RoiField {
    pub const ALL: [RoiField; 4] = [
        RoiField::MonthlyOrders,
        RoiField::AvgOrderValue,
        RoiField::CurrentReturnRate,
        RoiField::CostPerReturn,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RoiField::MonthlyOrders => "Average Monthly Online Orders",
            RoiField::AvgOrderValue => "Average Order Value (€)",
            RoiField::CurrentReturnRate => "Current Average Return Rate (%)",
            RoiField::CostPerReturn => "Estimated Cost per Return (€)",
        }
    }
}

/// Raw ROI form fields.
///
/// `Default` yields the documented reset state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiText {
    pub monthly_orders: String,
    pub avg_order_value: String,
    pub current_return_rate: String,
    pub cost_per_return: String,
}

impl Default for RoiText {
    fn default() -> Self {
        Self {
            monthly_orders: String::new(),
            avg_order_value: String::new(),
            current_return_rate: String::new(),
            cost_per_return: DEFAULT_COST_PER_RETURN.to_string(),
        }
    }
}

impl RoiText {
    pub fn field(&self, field: RoiField) -> &str {
        match field {
            RoiField::MonthlyOrders => &self.monthly_orders,
            RoiField::AvgOrderValue => &self.avg_order_value,
            RoiField::CurrentReturnRate => &self.current_return_rate,
            RoiField::CostPerReturn => &self.cost_per_return,
        }
    }

    pub fn field_mut(&mut self, field: RoiField) -> &mut String {
        match field {
            RoiField::MonthlyOrders => &mut self.monthly_orders,
            RoiField::AvgOrderValue => &mut self.avg_order_value,
            RoiField::CurrentReturnRate => &mut self.current_return_rate,
            RoiField::CostPerReturn => &mut self.cost_per_return,
        }
    }
}

/// Validated ROI input. Only `calc::roi::validate` builds one from text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiInput {
    pub monthly_orders: f64,
    /// Currency units.
    pub avg_order_value: f64,
    /// `0..=100`.
    pub current_return_rate_percent: f64,
    /// Currency units.
    pub cost_per_return: f64,
}

/// Current-state costs before any intervention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineResult {
    pub monthly_returned_orders: f64,
    pub monthly_processing_cost: f64,
    pub monthly_revenue_lost: f64,
    pub current_return_rate_decimal: f64,
}

/// Fractional return-rate reduction bounds (`0..=1`, `low <= high`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessRange {
    pub low: f64,
    pub high: f64,
}

impl EffectivenessRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Build a range from percentages (`10.0` means 10%).
    ///
    /// Returns `None` unless both bounds are finite, within `0..=100`, and ordered.
    pub fn from_percent(low_pct: f64, high_pct: f64) -> Option<Self> {
        let valid = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        if !(valid(low_pct) && valid(high_pct)) || low_pct > high_pct {
            return None;
        }
        Some(Self::new(low_pct / 100.0, high_pct / 100.0))
    }
}

/// Return-reduction technology categories with fixed effectiveness ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionCategory {
    SizeRecommendation,
    VtoAr,
    ReturnManagement,
}

impl InterventionCategory {
    pub const ALL: [InterventionCategory; 3] = [
        InterventionCategory::SizeRecommendation,
        InterventionCategory::VtoAr,
        InterventionCategory::ReturnManagement,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            InterventionCategory::SizeRecommendation => "Size Recommendation",
            InterventionCategory::VtoAr => "VTO / AR",
            InterventionCategory::ReturnManagement => "Return Management",
        }
    }

    pub fn effectiveness(self) -> EffectivenessRange {
        match self {
            InterventionCategory::SizeRecommendation => EffectivenessRange::new(0.10, 0.25),
            InterventionCategory::VtoAr => EffectivenessRange::new(0.05, 0.20),
            InterventionCategory::ReturnManagement => EffectivenessRange::new(0.08, 0.20),
        }
    }
}

/// Projected processing-cost savings for one effectiveness range.
///
/// New rates are percentages. `new_rate_low` comes from the *high* reduction
/// bound and `new_rate_high` from the *low* one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsProjection {
    pub monthly_low: f64,
    pub monthly_high: f64,
    pub annual_low: f64,
    pub annual_high: f64,
    pub new_rate_low: f64,
    pub new_rate_high: f64,
}

/// Full ROI result: baseline plus one projection per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiOutcome {
    pub baseline: BaselineResult,
    pub projections: BTreeMap<InterventionCategory, SavingsProjection>,
}

/// A projection labelled with the catalog solution it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedProjection {
    pub name: String,
    pub category: String,
    pub projection: SavingsProjection,
}

/// A vendor solution from the catalog.
///
/// Reduction rates are percentages, as the catalog data stores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub reduction_rate_low_pct: Option<f64>,
    pub reduction_rate_high_pct: Option<f64>,
    pub reduction_rate_basis: Option<String>,
    pub other_benefits: Vec<String>,
    pub integration_complexity: Option<String>,
    pub indicative_cost: Option<String>,
    pub privacy_concern_level: Option<String>,
    pub product_suitability_notes: Option<String>,
    pub example_vendors: Vec<String>,
}

/// Catalog filter. Empty/`None` criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionFilter {
    /// Any-of match.
    pub categories: Vec<String>,
    pub complexity: Option<String>,
    pub cost: Option<String>,
    pub privacy: Option<String>,
}

/// A saved result file (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultFile {
    pub tool: String,
    pub generated_at: String,
    pub payload: ResultPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultPayload {
    Emissions {
        input: ShipmentInput,
        result: EmissionsResult,
        breakdown: EmissionsBreakdown,
    },
    Roi {
        input: RoiInput,
        outcome: RoiOutcome,
        solutions: Vec<NamedProjection>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roi_text_default_is_reset_state() {
        let text = RoiText::default();
        assert_eq!(text.monthly_orders, "");
        assert_eq!(text.avg_order_value, "");
        assert_eq!(text.current_return_rate, "");
        assert_eq!(text.cost_per_return, "12.50");
    }

    #[test]
    fn effectiveness_from_percent_rejects_inverted_or_out_of_range() {
        let r = EffectivenessRange::from_percent(10.0, 20.0).unwrap();
        assert!((r.low - 0.10).abs() < 1e-12);
        assert!((r.high - 0.20).abs() < 1e-12);

        assert!(EffectivenessRange::from_percent(30.0, 20.0).is_none());
        assert!(EffectivenessRange::from_percent(-1.0, 20.0).is_none());
        assert!(EffectivenessRange::from_percent(10.0, 101.0).is_none());
        assert!(EffectivenessRange::from_percent(f64::NAN, 10.0).is_none());
    }

    #[test]
    fn category_presets_are_ordered_ranges() {
        for category in InterventionCategory::ALL {
            let r = category.effectiveness();
            assert!(0.0 <= r.low && r.low <= r.high && r.high <= 1.0);
        }
    }
}

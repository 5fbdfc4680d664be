//! Host-side form state for both calculators.
//!
//! The calculators in `calc` are pure; these structs own the mutable parts a
//! front-end needs (field text, the last result, the last error) and enforce
//! the edit, calculate, and reset rules in one place for the CLI and the TUI.

use crate::calc::{accepts_numeric_text, emissions, roi};
use crate::domain::{
    EmissionsResult, RoiField, RoiOutcome, RoiText, ShipmentField, ShipmentInput, ShipmentText,
};
use crate::error::ValidationError;

/// One CO2 calculation: the text and input it ran on, and what it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Co2Calculation {
    pub text: ShipmentText,
    pub input: ShipmentInput,
    pub result: EmissionsResult,
}

/// CO2 calculator form.
///
/// `result` keeps its own input snapshot; later edits to `text` do not
/// change what it reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Co2Form {
    pub text: ShipmentText,
    pub result: Option<Co2Calculation>,
}

impl Co2Form {
    /// Replace a field's text if the new text is an acceptable numeric state.
    ///
    /// Returns `false` (and leaves the field untouched) otherwise.
    pub fn edit(&mut self, field: ShipmentField, text: &str) -> bool {
        if !accepts_numeric_text(text) {
            return false;
        }
        *self.text.field_mut(field) = text.to_string();
        true
    }

    pub fn set_include_return(&mut self, include: bool) {
        self.text.include_return = include;
    }

    /// Fields currently shown; the return weight is hidden without a return leg.
    pub fn visible_fields(&self) -> Vec<ShipmentField> {
        ShipmentField::ALL
            .into_iter()
            .filter(|f| self.text.include_return || *f != ShipmentField::ReturnWeight)
            .collect()
    }

    pub fn input(&self) -> ShipmentInput {
        emissions::parse_shipment(&self.text)
    }

    pub fn calculate(&mut self) -> EmissionsResult {
        let input = self.input();
        let result = emissions::compute(&input);
        self.result = Some(Co2Calculation {
            text: self.text.clone(),
            input,
            result,
        });
        result
    }
}

/// ROI simulator form.
///
/// At most one of `outcome` and `error` is set: a failed calculation clears
/// the previous outcome so stale numbers never sit next to an error.
/// `calculated_text` is the text either of them came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoiForm {
    pub text: RoiText,
    pub outcome: Option<RoiOutcome>,
    pub error: Option<ValidationError>,
    pub calculated_text: Option<RoiText>,
}

impl RoiForm {
    pub fn edit(&mut self, field: RoiField, text: &str) -> bool {
        if !accepts_numeric_text(text) {
            return false;
        }
        *self.text.field_mut(field) = text.to_string();
        true
    }

    pub fn calculate(&mut self) -> Result<&RoiOutcome, &ValidationError> {
        self.calculated_text = Some(self.text.clone());
        match roi::compute(&self.text) {
            Ok(outcome) => {
                self.error = None;
                Ok(&*self.outcome.insert(outcome))
            }
            Err(err) => {
                self.outcome = None;
                Err(&*self.error.insert(err))
            }
        }
    }

    /// Restore documented defaults and clear results and errors.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

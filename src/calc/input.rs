//! Numeric text policy for form fields.
//!
//! Two independent stages:
//! - `accepts_numeric_text`: which edits a field accepts while the user types
//! - `parse_or_zero` / `parse_number`: which value a calculation reads
//!
//! Keeping them apart lets a field hold a partial number such as `"-"` or `"3."`
//! without the UI forcing a value mid-edit.

/// Whether `text` is an acceptable state for a numeric field.
///
/// Accepts the empty string and `^-?\d*\.?\d*$`: an optional leading minus,
/// digits, an optional decimal point, and more digits. An edit producing any
/// other text is rejected and the field keeps its previous value.
pub fn accepts_numeric_text(text: &str) -> bool {
    let rest = text.strip_prefix('-').unwrap_or(text);
    let mut seen_dot = false;
    for ch in rest.chars() {
        match ch {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    true
}

/// Lenient coercion used by the emissions calculator.
///
/// Empty, unparseable, or non-finite text reads as `0.0`.
pub fn parse_or_zero(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Coercion used by the ROI simulator.
///
/// A blank field reads as `0.0`; text that is not a finite number is `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

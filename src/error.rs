use thiserror::Error;

use crate::domain::RoiField;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// A single ROI input field that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: RoiField,
    pub message: String,
}

/// Rejected ROI inputs.
///
/// Carries every violated constraint, in form order, so the user sees all of
/// them at once rather than fixing one field per attempt.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", join_messages(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn involves(&self, field: RoiField) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join_messages(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(2, format!("Invalid input values provided. {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_joins_every_violation() {
        let err = ValidationError {
            violations: vec![
                FieldViolation {
                    field: RoiField::MonthlyOrders,
                    message: "first.".to_string(),
                },
                FieldViolation {
                    field: RoiField::CostPerReturn,
                    message: "second.".to_string(),
                },
            ],
        };
        assert_eq!(err.to_string(), "first. second.");
        assert!(err.involves(RoiField::CostPerReturn));
        assert!(!err.involves(RoiField::AvgOrderValue));

        let app: AppError = err.into();
        assert_eq!(app.exit_code(), 2);
        assert!(app.to_string().ends_with("first. second."));
    }
}

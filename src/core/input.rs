//! Validation of free-text amounts entered at the add-transaction boundary.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("amount is empty")]
    Empty,
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("amount must be finite")]
    NotFinite,
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("amount would push net worth out of range")]
    OutOfRange,
}

/// Parses a user-entered amount into a finite, strictly positive magnitude.
pub fn parse_amount(raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;
    validate_amount(value)
}

/// Checks an already-numeric amount against the same rules as [`parse_amount`].
pub fn validate_amount(value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite);
    }
    if value <= 0.0 {
        return Err(InputError::NotPositive);
    }
    Ok(value)
}

//! Boundary checks applied once when tool parameters become typed requests.

use chrono::NaiveDate;

use crate::control::ControlError;

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
/// Returns `ControlError::InvalidParameter` naming the parameter when the value
/// is not a valid date.
pub fn parse_date(name: &str, value: &str) -> Result<NaiveDate, ControlError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ControlError::InvalidParameter(format!("{name} must be a YYYY-MM-DD date, got '{value}'"))
    })
}

/// Parses an optional date, treating blank input as absent.
///
/// # Errors
/// Returns `ControlError::InvalidParameter` when a non-blank value is not a
/// valid date.
pub fn parse_optional_date(
    name: &str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, ControlError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| parse_date(name, value))
        .transpose()
}

/// Checks that a count lies within `min..=max`.
///
/// # Errors
/// Returns `ControlError::InvalidParameter` when the value is out of range.
pub fn bounded(name: &str, value: usize, min: usize, max: usize) -> Result<usize, ControlError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ControlError::InvalidParameter(format!(
            "{name} must be between {min} and {max}, got {value}"
        )))
    }
}

/// Checks that an optional amount is finite and not negative.
///
/// # Errors
/// Returns `ControlError::InvalidParameter` for negative or non-finite values.
pub fn non_negative(name: &str, value: Option<f64>) -> Result<Option<f64>, ControlError> {
    match value {
        Some(amount) if !amount.is_finite() || amount < 0.0 => Err(ControlError::InvalidParameter(
            format!("{name} must be a non-negative number, got {amount}"),
        )),
        other => Ok(other),
    }
}

/// Treats blank input as absent. Anything else is kept as given.
#[must_use]
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

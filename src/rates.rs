// Pure domain helpers shared by the UI handlers: input normalization,
// strict date validation and the cross-rate arithmetic used for
// conversion. Nothing here touches the network.

use chrono::NaiveDate;
use thiserror::Error;

/// Local validation failures, caught before any network call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid date format. Please use YYYY-MM-DD.")]
    BadDate,
    #[error("Amount must be a number.")]
    BadAmount,
}

/// Uppercase a currency code or comma-separated symbol list.
/// Idempotent: normalizing twice equals normalizing once.
pub fn normalize_symbols(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Validate a date against the strict `YYYY-MM-DD` pattern. Chrono
/// alone accepts unpadded fields like `2024-1-5`, so the parsed date
/// must also format back to the exact input.
pub fn parse_date(input: &str) -> Result<NaiveDate, InputError> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| InputError::BadDate)?;
    if date.format("%Y-%m-%d").to_string() != input {
        return Err(InputError::BadDate);
    }
    Ok(date)
}

/// Parse a user-entered amount.
pub fn parse_amount(input: &str) -> Result<f64, InputError> {
    input.trim().parse::<f64>().map_err(|_| InputError::BadAmount)
}

/// Cross-multiply two rates quoted against the same base currency to
/// convert `amount` from the currency behind `from_rate` into the one
/// behind `to_rate`.
pub fn cross_rate(amount: f64, from_rate: f64, to_rate: f64) -> f64 {
    (amount / to_rate) * from_rate
}

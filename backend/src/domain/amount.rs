//! Withdrawal amount parsing.
//!
//! Turns raw presentation input into a positive whole number of reward
//! units. Anything else is `Rejection::InvalidAmount`.

use super::outcome::Rejection;

/// Largest amount accepted from a client; keeps f64 conversion exact
const MAX_AMOUNT: i64 = 1 << 53;

/// Parse text input such as "25" or " 1,000 "
pub fn parse_withdrawal_amount(input: &str) -> Result<i64, Rejection> {
    let cleaned = input.trim().replace([',', ' '], "");
    if cleaned.is_empty() {
        return Err(Rejection::InvalidAmount);
    }

    let amount = cleaned
        .parse::<i64>()
        .map_err(|_| Rejection::InvalidAmount)?;
    validate_withdrawal_amount(amount)
}

/// Convert a JSON number, rejecting fractions, NaN and infinities
pub fn withdrawal_amount_from_number(value: f64) -> Result<i64, Rejection> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_AMOUNT as f64 {
        return Err(Rejection::InvalidAmount);
    }
    validate_withdrawal_amount(value as i64)
}

pub fn validate_withdrawal_amount(amount: i64) -> Result<i64, Rejection> {
    if amount <= 0 || amount > MAX_AMOUNT {
        return Err(Rejection::InvalidAmount);
    }
    Ok(amount)
}

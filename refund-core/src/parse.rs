//! Parsing of user-typed dollar amounts.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{AmountField, RefundError};

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses one form field into a [`Decimal`].
///
/// Accepts comma thousands separators (`"1,234.56"`) and scientific notation
/// (`"1.5e3"`). Empty input is an error: every field is required.
/// The sign is not checked here.
pub fn parse_amount(
    field: AmountField,
    s: &str,
) -> Result<Decimal, RefundError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        tracing::warn!(field = %field, "amount is empty");
        return Err(RefundError::Parse {
            field,
            input: s.to_string(),
        });
    }

    let parsed = Decimal::from_str(&normalized).ok().or_else(|| {
        if normalized.contains(['e', 'E']) {
            parse_scientific(&normalized)
        } else {
            None
        }
    });

    parsed.ok_or_else(|| {
        tracing::warn!(field = %field, input = %s, "invalid amount");
        RefundError::Parse {
            field,
            input: s.to_string(),
        }
    })
}

/// Parses `1.5e3`-style input. Exponents too small for a [`Decimal`] shrink
/// the value towards zero instead of failing.
fn parse_scientific(s: &str) -> Option<Decimal> {
    if let Ok(value) = Decimal::from_scientific(s) {
        return Some(value);
    }

    let (mantissa, exponent) = s.split_once(['e', 'E'])?;
    let mantissa = Decimal::from_str(mantissa).ok()?;
    let exponent: i64 = exponent.parse().ok()?;
    if exponent >= 0 {
        return None;
    }

    let mut value = mantissa;
    for _ in 0..exponent.unsigned_abs() {
        if value.is_zero() {
            break;
        }
        value /= Decimal::TEN;
    }
    Some(value)
}

//! Token amounts.
//!
//! Users type decimal token amounts; the chain counts base units
//! (10^-9 token). Conversion truncates toward zero: `1.9999999999` becomes
//! `1_999_999_999`, and anything below one base unit becomes `0`. It never
//! rounds up and never rejects extra precision.
//!
//! All arithmetic is `rust_decimal`, never `f64`. Input text is cut to nine
//! fractional digits before it is parsed.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::{BASE_UNITS_PER_TOKEN, TOKEN_DECIMALS};
use crate::error::{WalletError, WalletResult};

/// Integer digits beyond this can't be held next to nine fractional digits
/// without `Decimal` rounding.
const MAX_INTEGER_DIGITS: i64 = 19;

/// Parse a user-entered token amount.
///
/// Plain (`1.5`) and scientific (`15e-1`) notation are accepted. Digits past
/// the ninth decimal are dropped before the value reaches `Decimal`, so
/// long inputs truncate instead of rounding.
pub fn parse_amount(input: &str) -> WalletResult<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WalletError::invalid("amount is empty"));
    }
    let normalized = truncate_to_base_precision(trimmed)?;
    Decimal::from_str(&normalized)
        .map_err(|_| WalletError::invalid(format!("'{trimmed}' is not a number")))
}

/// Rewrite `input` as `[-]int.frac` with at most `TOKEN_DECIMALS`
/// fractional digits, shifting the point for any exponent.
fn truncate_to_base_precision(input: &str) -> WalletResult<String> {
    let not_a_number = || WalletError::invalid(format!("'{input}' is not a number"));

    let (negative, unsigned) = match input.as_bytes()[0] {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i64>().map_err(|_| not_a_number())?),
        None => (unsigned, 0),
    };
    let (int_digits, frac_digits) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_digits.is_empty() && frac_digits.is_empty())
        || !is_digits(int_digits)
        || !is_digits(frac_digits)
    {
        return Err(not_a_number());
    }

    let digits = format!("{int_digits}{frac_digits}");
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok("0".to_string());
    }
    // position of the decimal point relative to the first significant digit
    let point = (int_digits.len() as i64)
        .saturating_sub((digits.len() - significant.len()) as i64)
        .saturating_add(exponent);
    if point > MAX_INTEGER_DIGITS {
        return Err(WalletError::invalid("amount is too large"));
    }

    let decimals = TOKEN_DECIMALS as usize;
    let (int_part, frac_part) = if point <= 0 {
        let leading_zeros = usize::try_from(point.unsigned_abs())
            .unwrap_or(usize::MAX)
            .min(decimals);
        let tail: String = significant.chars().take(decimals - leading_zeros).collect();
        ("0".to_string(), format!("{}{tail}", "0".repeat(leading_zeros)))
    } else {
        let point = point as usize;
        if point >= significant.len() {
            let padding = "0".repeat(point - significant.len());
            (format!("{significant}{padding}"), String::new())
        } else {
            let (int_part, frac) = significant.split_at(point);
            (int_part.to_string(), frac.chars().take(decimals).collect())
        }
    };

    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        Ok(format!("{sign}{int_part}"))
    } else {
        Ok(format!("{sign}{int_part}.{frac_part}"))
    }
}

/// `floor(amount × 10^9)` as base units.
///
/// Negative amounts and amounts beyond `u64::MAX` base units are rejected.
pub fn to_base_units(amount: Decimal) -> WalletResult<u64> {
    if amount.is_zero() {
        return Ok(0);
    }
    if amount.is_sign_negative() {
        return Err(WalletError::invalid("amount must not be negative"));
    }
    amount
        .checked_mul(Decimal::from(BASE_UNITS_PER_TOKEN))
        .map(|scaled| scaled.floor())
        .and_then(|floored| floored.to_u64())
        .ok_or_else(|| WalletError::invalid("amount is too large"))
}

/// Parse and convert in one step.
pub fn parse_base_units(input: &str) -> WalletResult<u64> {
    to_base_units(parse_amount(input)?)
}

/// Base units back to a token amount. Exact.
pub fn from_base_units(base: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(base), TOKEN_DECIMALS)
}

//! # Native Units
//!
//! Humans say "10 CRO", contracts say `10_000_000_000_000_000_000`. These two
//! functions translate, with the same rules as `parseEther` / `formatEther`:
//! 18 decimals, no rounding, no scientific notation.

use thiserror::Error;

use crate::config::{NATIVE_DECIMALS, UNITS_PER_NATIVE};
use crate::types::Amount;

/// Errors from [`parse_native`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    /// Nothing to parse.
    #[error("empty amount")]
    Empty,

    /// A character other than digits and a single decimal point.
    #[error("invalid amount: {0}")]
    Invalid(String),

    /// More fractional digits than the currency has decimals.
    #[error("too many decimal places: {0} (max 18)")]
    TooPrecise(usize),

    /// The value does not fit in an [`Amount`].
    #[error("amount overflow: {0}")]
    Overflow(String),
}

/// Parses a decimal CRO amount (`"1"`, `"0.5"`, `"1250.000001"`) into
/// smallest units.
pub fn parse_native(input: &str) -> Result<Amount, UnitsError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(UnitsError::Invalid(s.to_string()));
    }
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(frac) {
        return Err(UnitsError::Invalid(s.to_string()));
    }
    if frac.len() > NATIVE_DECIMALS as usize {
        return Err(UnitsError::TooPrecise(frac.len()));
    }

    let overflow = || UnitsError::Overflow(s.to_string());

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<Amount>().map_err(|_| overflow())?
    };
    let frac_units = if frac.is_empty() {
        0
    } else {
        let padded = format!("{frac:0<width$}", width = NATIVE_DECIMALS as usize);
        padded.parse::<Amount>().map_err(|_| overflow())?
    };

    whole_units
        .checked_mul(UNITS_PER_NATIVE)
        .and_then(|w| w.checked_add(frac_units))
        .ok_or_else(overflow)
}

/// Formats smallest units as a decimal CRO string, trimming trailing zeros
/// but always keeping one fractional digit (`"10.0"`, `"0.25"`).
pub fn format_native(amount: Amount) -> String {
    let whole = amount / UNITS_PER_NATIVE;
    let frac = amount % UNITS_PER_NATIVE;
    let frac_str = format!("{frac:0>width$}", width = NATIVE_DECIMALS as usize);
    let trimmed = frac_str.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}

//! Native-asset amount handling.
//!
//! Amounts cross the dialog boundary as decimal strings in the chain's
//! display unit. The chain client converts to and from base units at the
//! node boundary; the dialog itself only validates drafts and fixes balances
//! to four decimal places for display. All arithmetic is integer arithmetic
//! on `u128` base units.

use std::fmt;

/// Decimal places of the native asset's base unit.
pub const NATIVE_DECIMALS: u32 = 18;

/// Decimal places shown for a balance result.
pub const BALANCE_DISPLAY_DECIMALS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AmountError {
    /// The draft was empty or whitespace.
    Empty,
    /// Not a plain unsigned decimal number.
    Malformed,
    /// More fractional digits than the base unit can represent.
    TooPrecise { decimals: u32 },
    /// Exceeds the representable range.
    Overflow,
    /// Parsed fine but equals zero; transfers must move something.
    NotPositive,
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "amount is empty"),
            Self::Malformed => write!(f, "amount is not a decimal number"),
            Self::TooPrecise { decimals } => {
                write!(f, "amount has more than {decimals} decimal places")
            }
            Self::Overflow => write!(f, "amount is out of range"),
            Self::NotPositive => write!(f, "amount must be greater than zero"),
        }
    }
}

/// Convert a display-unit decimal string into base units.
pub fn to_base_units(display: &str, decimals: u32) -> Result<u128, AmountError> {
    let s = display.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountError::Malformed);
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(AmountError::Malformed);
    }
    if frac_part.len() as u32 > decimals {
        return Err(AmountError::TooPrecise { decimals });
    }

    let scale = 10u128.pow(decimals);
    let int_val: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| AmountError::Overflow)?
    };
    let frac_val: u128 = if frac_part.is_empty() {
        0
    } else {
        frac_part.parse().map_err(|_| AmountError::Overflow)?
    };
    let frac_scaled = frac_val * 10u128.pow(decimals - frac_part.len() as u32);

    int_val
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_scaled))
        .ok_or(AmountError::Overflow)
}

/// Render base units as a display-unit decimal string, trailing zeros
/// trimmed.
pub fn from_base_units(base: u128, decimals: u32) -> String {
    let scale = 10u128.pow(decimals);
    let int_part = base / scale;
    let frac_part = base % scale;
    if frac_part == 0 {
        return int_part.to_string();
    }
    let frac = format!("{frac_part:0>width$}", width = decimals as usize);
    format!("{int_part}.{}", frac.trim_end_matches('0'))
}

/// Validate a transfer draft: a positive display-unit decimal.
pub fn validate_display_amount(display: &str) -> Result<(), AmountError> {
    let base = to_base_units(display, NATIVE_DECIMALS)?;
    if base == 0 {
        return Err(AmountError::NotPositive);
    }
    Ok(())
}

/// Fix a decimal string to exactly `places` fractional digits, truncating
/// extra digits rather than rounding. `"1.23456"` becomes `"1.2345"`.
pub fn fixed_decimals(display: &str, places: usize) -> String {
    let s = display.trim();
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let truncated: String = frac_part.chars().take(places).collect();
    format!("{int_part}.{truncated:0<places$}")
}

//! Integer ranges of Solidity numeric types

use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Full value range of an `intN` / `uintN`
pub fn type_bounds(signed: bool, bits: u16) -> (BigInt, BigInt) {
    if signed {
        let half = BigInt::one() << (usize::from(bits.max(1)) - 1);
        (-half.clone(), half - 1)
    } else {
        (BigInt::zero(), (BigInt::one() << usize::from(bits)) - 1)
    }
}

/// Range for fresh random values: the type range cut to `2^cap_bits - 1`
/// in magnitude; signed ranges are symmetric
pub fn sampling_bounds(signed: bool, bits: u16, cap_bits: u32) -> (BigInt, BigInt) {
    let cap = (BigInt::one() << cap_bits as usize) - 1;
    let (_, type_max) = type_bounds(signed, bits);
    let max = if type_max < cap { type_max } else { cap };
    if signed {
        (-max.clone(), max)
    } else {
        (BigInt::zero(), max)
    }
}

/// Scaled integer of a decimal literal with `decimals` fractional digits
///
/// Digits beyond the precision are truncated. `None` for non-decimal text.
pub fn parse_decimal(text: &str, decimals: u8) -> Option<BigInt> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut fraction: String = fraction.chars().take(usize::from(decimals)).collect();
    while fraction.len() < usize::from(decimals) {
        fraction.push('0');
    }
    let scaled = format!("{}{}", if whole.is_empty() { "0" } else { whole }, fraction);
    let value: BigInt = scaled.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Decimal text of a scaled integer, without trailing fractional zeros
pub fn format_decimal(units: &BigInt, decimals: u8) -> String {
    if decimals == 0 {
        return units.to_string();
    }
    let negative = units < &BigInt::zero();
    let digits = if negative { (-units).to_string() } else { units.to_string() };
    let width = usize::from(decimals);
    let padded = format!("{:0>w$}", digits, w = width + 1);
    let (whole, fraction) = padded.split_at(padded.len() - width);
    let fraction = fraction.trim_end_matches('0');
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{}{}", sign, whole)
    } else {
        format!("{}{}.{}", sign, whole, fraction)
    }
}

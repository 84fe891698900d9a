//! Number literal interpretation
//!
//! Solidity number literals come as decimal (`1_000`, `2.5`), scientific
//! (`1e18`, `2.5e-3`) or hex (`0xff`) text plus an optional unit. A hex
//! literal of exactly 40 digits is an address.

use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Largest decimal exponent we are willing to materialize
const MAX_EXPONENT: i64 = 256;

/// Interpreted value of one number literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    Integer(BigInt),
    /// Non-integral decimal, rendered without trailing zeros
    Fixed(String),
    Address(String),
}

impl LiteralValue {
    pub fn negate(self) -> Self {
        match self {
            LiteralValue::Integer(value) => LiteralValue::Integer(-value),
            LiteralValue::Fixed(text) => match text.strip_prefix('-') {
                Some(positive) => LiteralValue::Fixed(positive.to_string()),
                None => LiteralValue::Fixed(format!("-{}", text)),
            },
            address => address,
        }
    }
}

/// Multiplier of an ether or time unit; `None` for unknown units
pub fn unit_multiplier(unit: &str) -> Option<BigInt> {
    let factor: u64 = match unit {
        "wei" | "seconds" => 1,
        "gwei" => 1_000_000_000,
        "szabo" => 1_000_000_000_000,
        "finney" => 1_000_000_000_000_000,
        "ether" => 1_000_000_000_000_000_000,
        "minutes" => 60,
        "hours" => 3_600,
        "days" => 86_400,
        "weeks" => 604_800,
        "years" => 31_536_000,
        _ => return None,
    };
    Some(BigInt::from(factor))
}

/// Interpret literal text with an optional unit
pub fn parse_number_literal(text: &str, unit: Option<&str>) -> Option<LiteralValue> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let multiplier = match unit {
        Some(unit) => unit_multiplier(unit)?,
        None => BigInt::one(),
    };

    if let Some(hex) = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        if hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Some(LiteralValue::Address(format!("0x{}", hex)));
        }
        let value = BigInt::parse_bytes(hex.as_bytes(), 16)?;
        return Some(LiteralValue::Integer(value * multiplier));
    }

    let (mantissa, exponent) = match cleaned.find(['e', 'E']) {
        Some(at) => (&cleaned[..at], cleaned[at + 1..].parse::<i64>().ok()?),
        None => (cleaned.as_str(), 0),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let digits = format!("{}{}", int_part, frac_part);
    let digits = BigInt::parse_bytes(digits.as_bytes(), 10)?;
    let scale = frac_part.len() as i64 - exponent;
    if scale.abs() > MAX_EXPONENT {
        return None;
    }

    let numerator = digits * multiplier;
    if scale <= 0 {
        return Some(LiteralValue::Integer(numerator * pow10(-scale as u32)));
    }

    let denominator = pow10(scale as u32);
    let quotient = &numerator / &denominator;
    let remainder = &numerator % &denominator;
    if remainder.is_zero() {
        return Some(LiteralValue::Integer(quotient));
    }

    let fraction = format!("{:0>width$}", remainder.to_string(), width = scale as usize);
    Some(LiteralValue::Fixed(format!(
        "{}.{}",
        quotient,
        fraction.trim_end_matches('0')
    )))
}

fn pow10(exponent: u32) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exponent as usize)
}

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

use crate::types::{LendError, RawDecimal};

/// Trait for converting loosely typed values into `Decimal` for display.
///
/// This lets asset feeds hand over `i64`, `f64`, `&str`, etc. and get an
/// exact decimal back without each caller picking a parse routine.
///
/// Well-formed numbers never fail and never change sign or zero-ness.
/// Values smaller than `Decimal` can represent become the smallest non-zero
/// decimal, and values beyond its range saturate at `Decimal::MAX`/`MIN`.
pub trait IntoLendDecimal {
    fn into_lend_decimal(self) -> Result<Decimal, LendError>;
}

/// Largest scale `Decimal` supports.
const MAX_SCALE: i64 = 28;

fn invalid(value: impl ToString) -> LendError {
    LendError::InvalidNumber {
        field: String::new(),
        value: value.to_string(),
    }
}

/// A decimal literal split into sign, significant digits, and exponent:
/// the value is `digits * 10^exponent`.
#[derive(Debug, PartialEq, Eq)]
struct NumberParts {
    negative: bool,
    /// Without leading zeros; empty means zero.
    digits: String,
    exponent: i64,
}

impl NumberParts {
    /// Accepts `[+-]digits[.digits][(e|E)[+-]digits]`.
    fn parse(text: &str) -> Option<Self> {
        let s = text.trim();
        let (negative, rest) = match s.as_bytes().first()? {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };

        let (mantissa, exp) = match rest.find(|c: char| c == 'e' || c == 'E') {
            Some(i) => (&rest[..i], rest[i + 1..].parse::<i64>().ok()?),
            None => (rest, 0),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let digits = format!("{}{}", int_part, frac_part)
            .trim_start_matches('0')
            .to_string();
        Some(Self {
            negative,
            digits,
            exponent: exp.saturating_sub(frac_part.len() as i64),
        })
    }

    /// Power of ten of the leading significant digit.
    fn order(&self) -> i64 {
        (self.digits.len() as i64 - 1).saturating_add(self.exponent)
    }

    fn saturated(&self) -> Decimal {
        if self.negative { Decimal::MIN } else { Decimal::MAX }
    }

    fn smallest(&self) -> Decimal {
        let tiny = Decimal::new(1, MAX_SCALE as u32);
        if self.negative { -tiny } else { tiny }
    }

    /// Plain positional text, e.g. `12.5` or `0.0003`.
    fn plain_text(&self) -> String {
        let sign = if self.negative { "-" } else { "" };
        if self.exponent >= 0 {
            format!("{}{}{}", sign, self.digits, "0".repeat(self.exponent as usize))
        } else {
            let frac_len = self.exponent.unsigned_abs() as usize;
            if self.digits.len() > frac_len {
                let (int, frac) = self.digits.split_at(self.digits.len() - frac_len);
                format!("{}{}.{}", sign, int, frac)
            } else {
                let zeros = "0".repeat(frac_len - self.digits.len());
                format!("{}0.{}{}", sign, zeros, self.digits)
            }
        }
    }

    fn to_decimal(&self, source: &str) -> Decimal {
        if self.digits.is_empty() {
            return Decimal::ZERO;
        }
        let order = self.order();
        if order < -MAX_SCALE {
            warn!(value = source, "number below decimal precision, keeping smallest non-zero");
            return self.smallest();
        }
        if order > MAX_SCALE {
            warn!(value = source, "number beyond decimal range, saturating");
            return self.saturated();
        }

        // Extra fractional digits are rounded away here.
        match Decimal::from_str(&self.plain_text()) {
            Ok(value) if value.is_zero() => self.smallest(),
            Ok(value) => value,
            Err(_) => {
                warn!(value = source, "number beyond decimal range, saturating");
                self.saturated()
            }
        }
    }
}

// Implement for Decimal (passthrough)
impl IntoLendDecimal for Decimal {
    fn into_lend_decimal(self) -> Result<Decimal, LendError> {
        Ok(self)
    }
}

// Implement for Integers
macro_rules! impl_into_lend_decimal_int {
    ($($t:ty),*) => {
        $(
            impl IntoLendDecimal for $t {
                fn into_lend_decimal(self) -> Result<Decimal, LendError> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_lend_decimal_int!(i32, u32, i64, u64, isize, usize);

// Floats go through their shortest round-trip text so 0.1 stays 0.1.
macro_rules! impl_into_lend_decimal_float {
    ($($t:ty),*) => {
        $(
            impl IntoLendDecimal for $t {
                fn into_lend_decimal(self) -> Result<Decimal, LendError> {
                    if !self.is_finite() {
                        return Err(invalid(self));
                    }
                    let text = self.to_string();
                    NumberParts::parse(&text)
                        .map(|parts| parts.to_decimal(&text))
                        .ok_or_else(|| invalid(self))
                }
            }
        )*
    };
}

impl_into_lend_decimal_float!(f32, f64);

impl IntoLendDecimal for &str {
    fn into_lend_decimal(self) -> Result<Decimal, LendError> {
        NumberParts::parse(self)
            .map(|parts| parts.to_decimal(self))
            .ok_or_else(|| invalid(self))
    }
}

impl IntoLendDecimal for String {
    fn into_lend_decimal(self) -> Result<Decimal, LendError> {
        self.as_str().into_lend_decimal()
    }
}

impl IntoLendDecimal for RawDecimal {
    fn into_lend_decimal(self) -> Result<Decimal, LendError> {
        match self {
            RawDecimal::Integer(v) => v.into_lend_decimal(),
            RawDecimal::Float(v) => v.into_lend_decimal(),
            RawDecimal::Text(v) => v.into_lend_decimal(),
        }
    }
}

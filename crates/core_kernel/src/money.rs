//! Whole-unit money amounts
//!
//! The registry books every amount in whole Pakistani Rupees. Operators type
//! amounts into free-form inputs, so this module also provides the lenient
//! coercion used for ledger money fields: anything that is not a number is
//! worth zero, and fractional input is rounded to whole units using
//! rust_decimal rather than floating point.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;
use thiserror::Error;

/// ISO 4217 code of the registry currency
pub const CURRENCY_CODE: &str = "PKR";

/// Display symbol of the registry currency
pub const CURRENCY_SYMBOL: &str = "Rs";

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// A monetary amount in whole currency units
///
/// Serialized as a bare integer. Deserialization is lenient in the same way
/// as [`Money::coerce_json`], so imported records carrying strings or
/// fractional numbers still load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a new amount
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Creates a zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the amount in whole units
    pub fn amount(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Coerces free-form input into an amount
    ///
    /// Blank or non-numeric input yields zero. Decimal and scientific
    /// notation are accepted and rounded half away from zero.
    ///
    /// # Example
    ///
    /// ```
    /// use core_kernel::Money;
    ///
    /// assert_eq!(Money::coerce("1200"), Money::new(1200));
    /// assert_eq!(Money::coerce(" 99.5 "), Money::new(100));
    /// assert_eq!(Money::coerce("abc"), Money::zero());
    /// ```
    pub fn coerce(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::zero();
        }

        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .ok()
            .and_then(Self::from_decimal)
            .unwrap_or_default()
    }

    /// Coerces an arbitrary JSON value into an amount
    ///
    /// Numbers are rounded to whole units, strings go through
    /// [`Money::coerce`], and every other value (null, booleans, arrays,
    /// objects) is worth zero.
    pub fn coerce_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(number) => {
                if let Some(whole) = number.as_i64() {
                    Self(whole)
                } else {
                    number
                        .as_f64()
                        .and_then(|float| Decimal::try_from(float).ok())
                        .and_then(Self::from_decimal)
                        .unwrap_or_default()
                }
            }
            serde_json::Value::String(text) => Self::coerce(text),
            _ => Self::zero(),
        }
    }

    /// Outstanding remainder of a receivable after a payment, floored at zero
    pub fn outstanding(receivable: Money, paid: Money) -> Self {
        Self(receivable.0.saturating_sub(paid.0).max(0))
    }

    fn from_decimal(value: Decimal) -> Option<Self> {
        value
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Self)
    }
}

impl fmt::Display for Money {
    /// Formats as `Rs 1,234,567`, the way the registry shows Value, Paid and O/S
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if self.is_negative() {
            write!(f, "-{} {}", CURRENCY_SYMBOL, grouped)
        } else {
            write!(f, "{} {}", CURRENCY_SYMBOL, grouped)
        }
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Strict parse: only a plain base-10 integer is accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| MoneyError::InvalidAmount(s.to_string()))
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::coerce_json(&value))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn outstanding_is_clamped_difference(
            receivable in -1_000_000_000i64..1_000_000_000i64,
            paid in -1_000_000_000i64..1_000_000_000i64
        ) {
            let out = Money::outstanding(Money::new(receivable), Money::new(paid));
            prop_assert!(!out.is_negative());
            prop_assert_eq!(out.amount(), (receivable - paid).max(0));
        }

        #[test]
        fn coerce_round_trips_integers(amount in any::<i64>()) {
            prop_assert_eq!(Money::coerce(&amount.to_string()), Money::new(amount));
        }
    }
}

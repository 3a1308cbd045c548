//! Exact currency amounts.
//!
//! Amounts are stored as a whole number of minor units (cents) so that summing
//! many bills never accumulates floating-point error. Conversion to and from
//! decimal numbers only happens at the JSON and display boundaries.
//!
//! A single amount is limited to [Money::MAX]. Sums are kept in an `i128`, so
//! adding up more amounts of that size than could ever be stored cannot
//! overflow.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
};

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// An amount of money in minor units (hundredths of the currency unit).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i128);

impl Money {
    /// Zero minor units.
    pub const ZERO: Money = Money(0);

    /// The largest amount a single bill may have: ten trillion currency units.
    ///
    /// Every amount up to this limit is exactly representable as an `f64`
    /// number of cents, and fits in an SQLite INTEGER.
    pub const MAX: Money = Money(1_000_000_000_000_000);

    /// Create an amount from a number of cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents as i128)
    }

    /// Create an amount from a decimal number, rounding to the nearest cent.
    ///
    /// Returns `None` if `amount` is NaN, infinite, or further from zero than
    /// [Money::MAX].
    pub fn from_decimal(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0).round();

        if !cents.is_finite() || cents.abs() > Self::MAX.0 as f64 {
            return None;
        }

        Some(Self(cents as i128))
    }

    /// The amount in cents.
    pub const fn cents(&self) -> i128 {
        self.0
    }

    /// The amount as a decimal number, e.g. 1250 cents is `12.5`.
    ///
    /// Only use this for display and serialization, never for arithmetic.
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Whether the amount is below zero.
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Whether the amount is larger than [Money::MAX] allows for one bill.
    pub const fn exceeds_max(&self) -> bool {
        self.0 > Self::MAX.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let cents = self.0.unsigned_abs();

        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;

        Money::from_decimal(amount).ok_or_else(|| {
            de::Error::custom(format!(
                "{amount} is not a valid amount of money, amounts must be at most {}",
                Money::MAX
            ))
        })
    }
}

impl ToSql for Money {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        i64::try_from(self.0)
            .map(ToSqlOutput::from)
            .map_err(|error| rusqlite::Error::ToSqlConversionFailure(Box::new(error)))
    }
}

impl FromSql for Money {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Money::from_cents)
    }
}

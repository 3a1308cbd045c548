//! Calendar months and the period filter used to scope summaries.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};
use time::{Date, Month, OffsetDateTime, UtcOffset};

use crate::{Error, expense::Expense};

/// A calendar month in a specific year, e.g. January 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// The calendar year, e.g. 2024.
    pub year: i32,
    /// The month within `year`.
    pub month: Month,
}

impl YearMonth {
    /// Create the month `month` of `year`.
    pub const fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// The month that `date` falls in.
    pub fn of(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    /// The current month at the UTC offset `local_offset`.
    pub fn current(local_offset: UtcOffset) -> Self {
        Self::of(OffsetDateTime::now_utc().to_offset(local_offset).date())
    }

    /// Whether `date` falls in this month.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month as u8)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    /// Parse a `YYYY-MM` label.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPeriod(text.to_owned());

        let (year, month) = text.trim().split_once('-').ok_or_else(invalid)?;

        let is_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !is_digits(year) || !is_digits(month) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;

        Ok(Self::new(year, month))
    }
}

// Map keys in JSON must be strings, so months are always written as labels.
impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Selects which expenses a summary covers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Every expense, regardless of date.
    #[default]
    All,
    /// Only expenses in one calendar month.
    Month(YearMonth),
}

impl Period {
    /// Whether an expense on `date` belongs in this period.
    pub fn includes(&self, date: Date) -> bool {
        match self {
            Period::All => true,
            Period::Month(year_month) => year_month.contains(date),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::All => f.write_str("all"),
            Period::Month(year_month) => fmt::Display::fmt(year_month, f),
        }
    }
}

impl FromStr for Period {
    type Err = Error;

    /// Parse either `all` or a `YYYY-MM` label.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.trim().eq_ignore_ascii_case("all") {
            Ok(Period::All)
        } else {
            text.parse().map(Period::Month)
        }
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Keep the expenses that fall within `period`, preserving their order.
pub fn filter_by_period(expenses: &[Expense], period: Period) -> Vec<&Expense> {
    expenses
        .iter()
        .filter(|expense| period.includes(expense.occurred_on))
        .collect()
}

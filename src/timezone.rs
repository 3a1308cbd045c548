use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::{Error, period::YearMonth};

/// Get the current UTC offset of a canonical timezone, e.g. "Asia/Kolkata".
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

fn require_local_offset(canonical_timezone: &str) -> Result<UtcOffset, Error> {
    get_local_offset(canonical_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {canonical_timezone}");
        Error::InvalidTimezoneError(canonical_timezone.to_owned())
    })
}

/// Get the current calendar month in `canonical_timezone`.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `canonical_timezone` is not a
/// known timezone.
pub fn current_month(canonical_timezone: &str) -> Result<YearMonth, Error> {
    require_local_offset(canonical_timezone).map(YearMonth::current)
}

/// Get today's date in `canonical_timezone`.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `canonical_timezone` is not a
/// known timezone.
pub fn today(canonical_timezone: &str) -> Result<Date, Error> {
    let local_offset = require_local_offset(canonical_timezone)?;

    Ok(OffsetDateTime::now_utc().to_offset(local_offset).date())
}

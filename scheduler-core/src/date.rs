//! `YYYYMMDD` calendar dates.

use chrono::NaiveDate;

use crate::error::{SchedulerError, SchedulerResult};

/// Storage and wire format of every task date.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Parse a `YYYYMMDD` string into a calendar date.
///
/// Only the fixed 8-digit form is accepted; separators, signs and
/// shorter or longer years are rejected.
pub fn parse_date(s: &str) -> SchedulerResult<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SchedulerError::BadDateFormat(s.to_string()));
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| SchedulerError::BadDateFormat(s.to_string()))
}

/// Format a calendar date as `YYYYMMDD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

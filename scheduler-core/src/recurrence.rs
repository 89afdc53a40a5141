//! Next occurrence of a recurring task.
//!
//! Advances the anchor date by whole rule steps until the result falls
//! strictly after the reference date. Stale anchors are handled by the same
//! loop, so callers never have to iterate themselves.

use chrono::{Days, Months, NaiveDate};

use crate::date::{format_date, parse_date};
use crate::error::{SchedulerError, SchedulerResult};
use crate::rule::Rule;

/// Compute the next occurrence of `rule` from the `YYYYMMDD` anchor
/// `start_date`, strictly after `now`.
pub fn next_date(now: NaiveDate, start_date: &str, rule: &str) -> SchedulerResult<String> {
    let start = parse_date(start_date)?;

    if rule.is_empty() {
        return Err(SchedulerError::EmptyRule);
    }

    let rule = Rule::parse(rule)?;
    next_occurrence(now, start, rule).map(format_date)
}

/// Compute the first `start + k * step` (k >= 1) that is strictly after `now`.
pub fn next_occurrence(now: NaiveDate, start: NaiveDate, rule: Rule) -> SchedulerResult<NaiveDate> {
    let out_of_range = || SchedulerError::DateOutOfRange(format_date(start));

    match rule {
        Rule::Days(days) => {
            let step = Days::new(u64::from(days));
            let mut next = start.checked_add_days(step).ok_or_else(out_of_range)?;
            while next <= now {
                next = next.checked_add_days(step).ok_or_else(out_of_range)?;
            }
            Ok(next)
        }
        Rule::Yearly => {
            // Each candidate is offset from the anchor so a Feb 29 anchor
            // returns to Feb 29 in leap years instead of sticking to Feb 28.
            let mut years: u32 = 1;
            loop {
                let months = years.checked_mul(12).ok_or_else(out_of_range)?;
                let next = start
                    .checked_add_months(Months::new(months))
                    .ok_or_else(out_of_range)?;
                if next > now {
                    return Ok(next);
                }
                years += 1;
            }
        }
    }
}

//! Recurrence rule grammar.
//!
//! A rule is a whitespace-separated list of tokens:
//! - `d <N>`: every N days, `1 <= N <= 400`
//! - `y`: every year on the same month and day
//!
//! The unit letters `w` and `m` are reserved but not supported, so they are
//! rejected here as well as by the next-date computation.

use crate::error::{SchedulerError, SchedulerResult};

/// Largest accepted day interval.
pub const MAX_DAY_INTERVAL: u32 = 400;

/// A parsed recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Every N days
    Days(u32),
    /// Every year on the anchor's month and day
    Yearly,
}

impl Rule {
    /// Parse a rule string.
    pub fn parse(rule: &str) -> SchedulerResult<Self> {
        let tokens: Vec<&str> = rule.split_whitespace().collect();

        let Some((unit, args)) = tokens.split_first() else {
            return Err(SchedulerError::EmptyRule);
        };

        match *unit {
            "d" => match args {
                [] => Err(SchedulerError::InvalidInterval(
                    "missing number of days".to_string(),
                )),
                [days] => parse_interval(days).map(Rule::Days),
                _ => Err(SchedulerError::UnsupportedRule(rule.to_string())),
            },
            "y" if args.is_empty() => Ok(Rule::Yearly),
            _ => Err(SchedulerError::UnsupportedRule(rule.to_string())),
        }
    }
}

fn parse_interval(s: &str) -> SchedulerResult<u32> {
    let days: i64 = s
        .parse()
        .map_err(|_| SchedulerError::InvalidInterval(format!("'{}' is not a number", s)))?;

    if days <= 0 || days > i64::from(MAX_DAY_INTERVAL) {
        return Err(SchedulerError::InvalidInterval(format!(
            "{} is outside 1..={}",
            days, MAX_DAY_INTERVAL
        )));
    }

    Ok(days as u32)
}

/// Check that a rule string satisfies the recurrence grammar.
pub fn validate_rule(rule: &str) -> SchedulerResult<()> {
    Rule::parse(rule).map(|_| ())
}

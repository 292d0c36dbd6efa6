//! Period calendar
//!
//! Builds the canonical date axis for a period. Every other component filters
//! its records against this axis and silently ignores anything outside it.

use crate::error::ComputeError;
use chrono::{Days, Local, NaiveDate};
use std::collections::HashSet;
use tracing::warn;

/// Calendar-day key format
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Default period length in days
pub const DEFAULT_PERIOD_DAYS: usize = 7;

/// Date keys for the last `days` days, ending today (local civil date)
pub fn dates_in_period(days: usize) -> Vec<String> {
    dates_in_period_ending(Local::now().date_naive(), days)
}

/// Date keys for the `days` days ending at `today`, ascending.
///
/// A period reaching back past `NaiveDate::MIN` is clamped to start there, so
/// the axis is shorter than `days` only in that case.
pub fn dates_in_period_ending(today: NaiveDate, days: usize) -> Vec<String> {
    let reachable = usize::try_from((today - NaiveDate::MIN).num_days())
        .map_or(usize::MAX, |d| d.saturating_add(1));
    if days > reachable {
        warn!(days, reachable, "period starts before the earliest date; clamping");
    }

    (0..days.min(reachable))
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset as u64)))
        .map(format_date_key)
        .collect()
}

/// Format a date as a `YYYY-MM-DD` key
pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` key
pub fn parse_date_key(key: &str) -> Result<NaiveDate, ComputeError> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
        .map_err(|e| ComputeError::DateParseError(format!("{key}: {e}")))
}

/// Whether `key` is a well-formed `YYYY-MM-DD` key
pub fn is_valid_date_key(key: &str) -> bool {
    key.len() == 10 && parse_date_key(key).is_ok()
}

/// Borrowed view over an axis with constant-time membership
pub struct DateAxis<'a> {
    keys: &'a [String],
    members: HashSet<&'a str>,
}

impl<'a> DateAxis<'a> {
    pub fn new(keys: &'a [String]) -> Self {
        Self {
            keys,
            members: keys.iter().map(String::as_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, date: &str) -> bool {
        self.members.contains(date)
    }

    /// Split into two contiguous halves at `floor(len / 2)`.
    /// The first half gets the lower indices.
    pub fn halves(&self) -> (HashSet<&'a str>, HashSet<&'a str>) {
        let mid = self.keys.len() / 2;
        let first = self.keys[..mid].iter().map(String::as_str).collect();
        let second = self.keys[mid..].iter().map(String::as_str).collect();
        (first, second)
    }

    pub fn first(&self) -> Option<&'a str> {
        self.keys.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&'a str> {
        self.keys.last().map(String::as_str)
    }
}

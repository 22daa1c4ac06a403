//! Calendar date-key utilities for the pocket-money projector.
//!
//! All dates handled by the projector are calendar dates without a time of
//! day or timezone. Keys travel as `YYYY-MM-DD` strings and are parsed into
//! `chrono::NaiveDate`, so day differences are exact whole days with no
//! daylight-saving drift.
//!
//! Two parsing flavours exist:
//!
//! - **Lenient** (`parse_date_key`, `day_diff`): malformed keys become `None`
//!   or zero. This is what totals computation uses.
//! - **Strict** (`DateKey::parse`, `month_bounds`): malformed keys are
//!   reported as `ProjectorError`.

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::errors::{ProjectorError, ProjectorResult};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` key, also accepting the date part of an RFC 3339 timestamp
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let date_part = key.trim().split('T').next()?;
    NaiveDate::parse_from_str(date_part, DATE_KEY_FORMAT).ok()
}

/// Format a date as a `YYYY-MM-DD` key
pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
///
/// Returns 0 when either key fails to parse.
pub fn day_diff(from: &str, to: &str) -> i64 {
    match (parse_date_key(from), parse_date_key(to)) {
        (Some(from), Some(to)) => (to - from).num_days(),
        _ => 0,
    }
}

/// Whether `today` falls inside the inclusive `[month_start, month_end]` range
pub fn is_current_month(today: &str, month_start: &str, month_end: &str) -> bool {
    match (
        parse_date_key(today),
        parse_date_key(month_start),
        parse_date_key(month_end),
    ) {
        (Some(today), Some(start), Some(end)) => start <= today && today <= end,
        _ => false,
    }
}

/// Strictly validated calendar date key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Parse a canonical `YYYY-MM-DD` key. Signs, unpadded fields and
    /// timestamp suffixes are rejected.
    pub fn parse(key: &str) -> ProjectorResult<Self> {
        let trimmed = key.trim();
        let invalid = || ProjectorError::InvalidDateKey(key.to_string());

        let date = NaiveDate::parse_from_str(trimmed, DATE_KEY_FORMAT).map_err(|_| invalid())?;
        if format_date_key(date) != trimmed {
            return Err(invalid());
        }
        Ok(DateKey(date))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_date_key(self.0))
    }
}

/// First and last day of the month named by a `YYYY-MM` key
pub fn month_bounds(month_key: &str) -> ProjectorResult<(NaiveDate, NaiveDate)> {
    let invalid = || ProjectorError::InvalidMonthKey(month_key.to_string());

    let (year, month) = month_key.trim().split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || month.len() != 2 {
        return Err(invalid());
    }
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) || year < 0 {
        return Err(invalid());
    }

    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_signed(Duration::days(1)))
        .ok_or_else(invalid)?;
    Ok((start, end))
}

/// `YYYY-MM` key of the month containing `date`
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

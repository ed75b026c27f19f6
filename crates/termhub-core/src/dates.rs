//! Wire date helpers.
//!
//! Term and holiday dates cross the API boundary as `YYYY-MM-DD` strings
//! and are stored as [`time::Date`] values internally.

use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::CoreError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` wire date.
pub fn parse_date(value: &str) -> Result<Date, CoreError> {
    Date::parse(value, DATE_FORMAT).map_err(|_| CoreError::invalid_date(value))
}

/// Formats a date back to its `YYYY-MM-DD` wire form.
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_default()
}

/// A range is valid when the start does not fall after the end.
pub fn date_range_valid(start: Date, end: Date) -> bool {
    start <= end
}

//! Business services orchestrating storage and remote accessors.

pub mod holidays;
pub mod terms;

pub use holidays::HolidayService;
pub use terms::TermService;

use time::Date;
use uuid::Uuid;

use termhub_core::dates::{date_range_valid, parse_date};

use crate::error::ApiError;

/// Parses and validates a wire date range, naming the record in failures.
fn parse_range(title: &str, start: &str, end: &str) -> Result<(Date, Date), ApiError> {
    let start = parse_date(start)
        .map_err(|_| ApiError::BadRequest(format!("invalid start_date for {title}")))?;
    let end = parse_date(end)
        .map_err(|_| ApiError::BadRequest(format!("invalid end_date for {title}")))?;
    if !date_range_valid(start, end) {
        return Err(ApiError::BadRequest(format!(
            "start_date must be before or equal to end_date for {title}"
        )));
    }
    Ok((start, end))
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::BadRequest(format!("invalid id format: {id}")))
}

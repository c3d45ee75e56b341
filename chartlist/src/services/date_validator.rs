//! Input validation for the submitted chart date

use chrono::NaiveDate;

use crate::error::DateError;
use crate::types::{ChartDate, DATE_FORMAT};

/// Parse `input` as YYYY-MM-DD and reject dates after `today`
///
/// Surrounding whitespace is ignored. `today` itself is accepted.
pub fn validate_date(input: &str, today: NaiveDate) -> Result<ChartDate, DateError> {
    let trimmed = input.trim();

    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| DateError::Unparsable(trimmed.to_string()))?;

    if date > today {
        return Err(DateError::InFuture(date));
    }

    Ok(ChartDate::new(date))
}

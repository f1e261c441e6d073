//! Parsing of request parameters that carry domain values.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::Date;

/// Shape of an ISO calendar date: `YYYY-M-D` with one- or two-digit month/day.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<year>\d{4})-(?P<month>\d{1,2})-(?P<day>\d{1,2})$").expect("valid regex")
});

/// Parse an optional date query parameter.
///
/// - Missing or empty input yields `Ok(None)`.
/// - Input that does not have the shape of a date (e.g. `"jhkjhk"`) also
///   yields `Ok(None)`; callers treat it as if the parameter was absent.
/// - Input shaped like a date that is not a real calendar day (e.g.
///   `"2022-13-01"`) yields [`CoreError::InvalidParameter`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use thesaurus_core::params::parse_date_param;
///
/// assert_eq!(
///     parse_date_param("actual_to", Some("2022-08-15")).unwrap(),
///     NaiveDate::from_ymd_opt(2022, 8, 15)
/// );
/// assert_eq!(parse_date_param("actual_to", Some("jhkjhk")).unwrap(), None);
/// assert!(parse_date_param("actual_to", Some("2022-13-01")).is_err());
/// ```
pub fn parse_date_param(name: &'static str, raw: Option<&str>) -> Result<Option<Date>, CoreError> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let Some(caps) = DATE_RE.captures(raw) else {
        return Ok(None);
    };

    let invalid = || CoreError::InvalidParameter(name);
    let year: i32 = caps["year"].parse().map_err(|_| invalid())?;
    let month: u32 = caps["month"].parse().map_err(|_| invalid())?;
    let day: u32 = caps["day"].parse().map_err(|_| invalid())?;

    // Year 0 exists in the proleptic calendar but not as a request date.
    if year < 1 {
        return Err(invalid());
    }

    Date::from_ymd_opt(year, month, day)
        .map(Some)
        .ok_or_else(invalid)
}

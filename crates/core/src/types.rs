/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date without time zone (version start dates, `actual_to`).
pub type Date = chrono::NaiveDate;

/// The default reference date for "current version" lookups.
pub fn today() -> Date {
    chrono::Utc::now().date_naive()
}

//! Error types for calendar-day and time-zone conversions.

use thiserror::Error;

/// Errors from fixed-day conversion or zone lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Gregorian year outside the supported proleptic range (1..=9999).
    #[error("Gregorian year {0} is outside the supported range 1..=9999")]
    DateRange(i64),
    /// Fixed (R.D.) day number outside the supported range.
    #[error("fixed day {0} is outside the supported range")]
    FixedRange(i64),
    /// Month/day combination that does not exist in the Gregorian calendar.
    #[error("invalid Gregorian date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    /// IANA zone identifier not present in the compiled zone database.
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),
}

//! Error types for Hebrew calendar conversions.

use thiserror::Error;
use zmanim_time::TimeError;

use crate::month::HebrewMonth;

/// Errors from Hebrew calendar construction and conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CalendarError {
    /// Date outside the supported domain (Gregorian 1..=9999, Hebrew year ≥ 1).
    #[error("date outside the supported range: {0}")]
    DateRange(String),
    /// Month that does not occur in the given year (Adar II in a common year).
    #[error("{month} does not occur in Hebrew year {year}")]
    InvalidMonth { year: i32, month: HebrewMonth },
    /// Day number outside the month's length.
    #[error("day {day} is outside {month} {year}")]
    InvalidDay { year: i32, month: HebrewMonth, day: u8 },
    /// Daf Yomi requested before the first cycle began.
    #[error("Daf Yomi is undefined before 1923-09-11")]
    BeforeDafYomi,
}

impl From<TimeError> for CalendarError {
    fn from(e: TimeError) -> Self {
        Self::DateRange(e.to_string())
    }
}

//! Calendar-day and time-zone primitives shared by the zmanim crates.
//!
//! This crate provides:
//! - Fixed (Rata Die) day numbers for the proleptic Gregorian calendar
//! - Julian Date ↔ calendar conversions used by the solar calculator
//! - IANA time-zone offset and local-date helpers

pub mod error;
pub mod fixed;
pub mod julian;
pub mod zone;

pub use error::TimeError;
pub use fixed::{
    MAX_FIXED, MAX_GREGORIAN_YEAR, MIN_FIXED, MIN_GREGORIAN_YEAR, days_in_gregorian_month,
    fixed_from_gregorian, fixed_from_naive, gregorian_from_fixed, is_gregorian_leap_year,
    naive_from_fixed, weekday_from_fixed, weekday_on_or_before,
};
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY, calendar_to_jd, centuries_to_jd, jd_to_calendar,
    jd_to_centuries,
};
pub use zone::{
    local_date_of, local_midnight_utc, parse_time_zone, to_local, utc_from_hours,
    utc_offset_hours, utc_offset_seconds,
};

pub use chrono_tz::Tz;

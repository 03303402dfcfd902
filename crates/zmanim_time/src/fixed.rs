//! Fixed day numbers (Rata Die) for the proleptic Gregorian calendar.
//!
//! R.D. 1 is Monday, 1 January 1 CE. Every calendar in the workspace is
//! converted through this single integer axis, so a Hebrew date and a
//! Gregorian date are equal exactly when their fixed days are equal.
//!
//! Source: Dershowitz & Reingold, *Calendrical Calculations*, ch. 2.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::TimeError;

/// First supported Gregorian year.
pub const MIN_GREGORIAN_YEAR: i32 = 1;

/// Last supported Gregorian year.
pub const MAX_GREGORIAN_YEAR: i32 = 9999;

/// Fixed day of 1 January 1 CE.
pub const MIN_FIXED: i64 = 1;

/// Fixed day of 31 December 9999.
pub const MAX_FIXED: i64 = 3_652_059;

/// Whether a Gregorian year is a leap year.
pub const fn is_gregorian_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a Gregorian month.
pub const fn days_in_gregorian_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_gregorian_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn check_year(year: i32) -> Result<(), TimeError> {
    if !(MIN_GREGORIAN_YEAR..=MAX_GREGORIAN_YEAR).contains(&year) {
        return Err(TimeError::DateRange(year as i64));
    }
    Ok(())
}

/// Fixed day number of a Gregorian date.
pub fn fixed_from_gregorian(year: i32, month: u32, day: u32) -> Result<i64, TimeError> {
    check_year(year)?;
    if !(1..=12).contains(&month) || day == 0 || day > days_in_gregorian_month(year, month) {
        return Err(TimeError::InvalidDate { year, month, day });
    }
    Ok(fixed_unchecked(year, month, day))
}

fn fixed_unchecked(year: i32, month: u32, day: u32) -> i64 {
    let y = year as i64 - 1;
    let m = month as i64;
    let correction = if month <= 2 {
        0
    } else if is_gregorian_leap_year(year) {
        -1
    } else {
        -2
    };
    365 * y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400) + (367 * m - 362) / 12
        + correction
        + day as i64
}

/// Gregorian year containing a fixed day.
fn gregorian_year_from_fixed(fixed: i64) -> i32 {
    let d0 = fixed - 1;
    let n400 = d0.div_euclid(146_097);
    let d1 = d0.rem_euclid(146_097);
    let n100 = d1 / 36_524;
    let d2 = d1 % 36_524;
    let n4 = d2 / 1_461;
    let d3 = d2 % 1_461;
    let n1 = d3 / 365;
    let year = 400 * n400 + 100 * n100 + 4 * n4 + n1;
    if n100 == 4 || n1 == 4 {
        year as i32
    } else {
        year as i32 + 1
    }
}

/// Gregorian `(year, month, day)` of a fixed day number.
pub fn gregorian_from_fixed(fixed: i64) -> Result<(i32, u32, u32), TimeError> {
    if !(MIN_FIXED..=MAX_FIXED).contains(&fixed) {
        return Err(TimeError::FixedRange(fixed));
    }
    let year = gregorian_year_from_fixed(fixed);
    let prior_days = fixed - fixed_unchecked(year, 1, 1);
    let correction = if fixed < fixed_unchecked(year, 3, 1) {
        0
    } else if is_gregorian_leap_year(year) {
        1
    } else {
        2
    };
    let month = ((12 * (prior_days + correction) + 373) / 367) as u32;
    let day = (fixed - fixed_unchecked(year, month, 1) + 1) as u32;
    Ok((year, month, day))
}

/// Day of week of a fixed day (R.D. 0 is a Sunday).
pub fn weekday_from_fixed(fixed: i64) -> Weekday {
    match fixed.rem_euclid(7) {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// Fixed day number of a `NaiveDate`.
pub fn fixed_from_naive(date: NaiveDate) -> Result<i64, TimeError> {
    fixed_from_gregorian(date.year(), date.month(), date.day())
}

/// `NaiveDate` of a fixed day number.
pub fn naive_from_fixed(fixed: i64) -> Result<NaiveDate, TimeError> {
    let (year, month, day) = gregorian_from_fixed(fixed)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(TimeError::InvalidDate { year, month, day })
}

/// Fixed day of the first `weekday` on or before `fixed`.
pub fn weekday_on_or_before(weekday: Weekday, fixed: i64) -> i64 {
    let k = weekday.num_days_from_sunday() as i64;
    fixed - (fixed - k).rem_euclid(7)
}

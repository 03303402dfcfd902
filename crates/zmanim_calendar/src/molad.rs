//! Molad (mean lunar conjunction) of a Hebrew month.
//!
//! Times are in Jerusalem mean time, counted from midnight. The traditional
//! announcement counts hours from 6 pm; subtracting six hours from the
//! BeHaRaD epoch gives clock hours directly.

use chrono::Weekday;
use serde::Serialize;

use zmanim_time::weekday_from_fixed;

use crate::error::CalendarError;
use crate::month::HebrewMonth;
use crate::year::{
    CHALAKIM_PER_DAY, CHALAKIM_PER_HOUR, CHALAKIM_PER_MONTH, HEBREW_EPOCH_FIXED,
    MOLAD_BEHARAD_CHALAKIM, months_elapsed, months_in_year,
};

/// Chalakim in one minute.
pub const CHALAKIM_PER_MINUTE: i64 = 18;

/// A molad to chalakim precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Molad {
    /// Fixed (R.D.) day on which the molad falls.
    pub fixed: i64,
    pub weekday: Weekday,
    /// Clock hour, 0..=23.
    pub hours: u8,
    /// Parts past the hour, 0..=1079.
    pub chalakim_in_hour: u16,
    /// Whole minutes past the hour, 0..=59.
    pub minutes: u8,
    /// Parts past the minute, 0..=17.
    pub chalakim: u8,
}

impl Molad {
    fn from_total(total: i64) -> Self {
        let day = total.div_euclid(CHALAKIM_PER_DAY);
        let parts = total.rem_euclid(CHALAKIM_PER_DAY);
        let fixed = HEBREW_EPOCH_FIXED + day;
        let in_hour = parts % CHALAKIM_PER_HOUR;
        Self {
            fixed,
            weekday: weekday_from_fixed(fixed),
            hours: (parts / CHALAKIM_PER_HOUR) as u8,
            chalakim_in_hour: in_hour as u16,
            minutes: (in_hour / CHALAKIM_PER_MINUTE) as u8,
            chalakim: (in_hour % CHALAKIM_PER_MINUTE) as u8,
        }
    }
}

/// Chalakim from the epoch midnight to the molad of `month` in `year`.
fn molad_total(year: i32, month: HebrewMonth) -> i64 {
    let mut offset = month.number() as i64 - 7;
    if offset < 0 {
        offset += months_in_year(year) as i64;
    }
    MOLAD_BEHARAD_CHALAKIM - 6 * CHALAKIM_PER_HOUR
        + (months_elapsed(year) + offset) * CHALAKIM_PER_MONTH
}

/// Molad of `month` in `year`.
pub fn molad(year: i32, month: HebrewMonth) -> Result<Molad, CalendarError> {
    if year < 1 {
        return Err(CalendarError::DateRange(format!("Hebrew year {year}")));
    }
    if !month.occurs_in(year) {
        return Err(CalendarError::InvalidMonth { year, month });
    }
    Ok(Molad::from_total(molad_total(year, month)))
}

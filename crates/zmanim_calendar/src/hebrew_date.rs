//! Immutable Hebrew calendar date.
//!
//! A [`HebrewDate`] carries its fixed (R.D.) day alongside (year, month,
//! day), so comparisons, weekday and Gregorian conversion are O(1). All
//! transforms return new values.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use chrono::{NaiveDate, Weekday};
use serde::Serialize;

use zmanim_time::{MAX_FIXED, fixed_from_naive, naive_from_fixed, weekday_from_fixed};

use crate::error::CalendarError;
use crate::month::{HebrewMonth, months_of_year};
use crate::year::{
    HEBREW_EPOCH_FIXED, days_in_month, days_in_year, is_leap_year, new_year_fixed,
};

/// Last Hebrew year whose Rosh Hashana falls inside Gregorian 9999.
pub const MAX_HEBREW_YEAR: i32 = 13_760;

/// Mean Hebrew year length in days, used to estimate the year of a fixed day.
const MEAN_YEAR_DAYS: f64 = 365.246_822_205_977_94;

/// A date in the Hebrew calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HebrewDate {
    year: i32,
    month: HebrewMonth,
    day: u8,
    fixed: i64,
}

fn check_year(year: i32) -> Result<(), CalendarError> {
    if !(1..=MAX_HEBREW_YEAR).contains(&year) {
        return Err(CalendarError::DateRange(format!("Hebrew year {year}")));
    }
    Ok(())
}

/// Days from 1 Tishrei to the first of `month` in `year`.
fn days_before_month(year: i32, month: HebrewMonth) -> i64 {
    months_of_year(year)
        .take_while(|m| *m != month)
        .map(|m| days_in_month(year, m) as i64)
        .sum()
}

impl HebrewDate {
    /// Validate and build a date.
    pub fn new(year: i32, month: HebrewMonth, day: u8) -> Result<Self, CalendarError> {
        check_year(year)?;
        if !month.occurs_in(year) {
            return Err(CalendarError::InvalidMonth { year, month });
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(CalendarError::InvalidDay { year, month, day });
        }
        let fixed = new_year_fixed(year) + days_before_month(year, month) + day as i64 - 1;
        Ok(Self {
            year,
            month,
            day,
            fixed,
        })
    }

    /// Date of a fixed (R.D.) day.
    pub fn from_fixed(fixed: i64) -> Result<Self, CalendarError> {
        if fixed <= HEBREW_EPOCH_FIXED || fixed > MAX_FIXED {
            return Err(CalendarError::DateRange(format!("fixed day {fixed}")));
        }
        let approx = ((fixed - HEBREW_EPOCH_FIXED) as f64 / MEAN_YEAR_DAYS).floor() as i32;
        let mut year = approx.max(1);
        while new_year_fixed(year + 1) <= fixed {
            year += 1;
        }
        while year > 1 && new_year_fixed(year) > fixed {
            year -= 1;
        }

        let nisan_first = new_year_fixed(year) + days_before_month(year, HebrewMonth::Nisan);
        let mut month_number = if fixed < nisan_first { 7 } else { 1 };
        let mut month_start = if fixed < nisan_first {
            new_year_fixed(year)
        } else {
            nisan_first
        };
        let mut month = HebrewMonth::Tishrei;
        while let Some(m) = HebrewMonth::from_number(month_number) {
            month = m;
            let len = days_in_month(year, m) as i64;
            if fixed < month_start + len {
                break;
            }
            month_start += len;
            month_number += 1;
        }
        Ok(Self {
            year,
            month,
            day: (fixed - month_start + 1) as u8,
            fixed,
        })
    }

    /// Date of a Gregorian day.
    pub fn from_gregorian(date: NaiveDate) -> Result<Self, CalendarError> {
        Self::from_fixed(fixed_from_naive(date)?)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> HebrewMonth {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Fixed (R.D.) day number.
    pub fn to_fixed(&self) -> i64 {
        self.fixed
    }

    /// Gregorian date; fails for dates before 1 CE.
    pub fn to_gregorian(&self) -> Result<NaiveDate, CalendarError> {
        Ok(naive_from_fixed(self.fixed)?)
    }

    pub fn weekday(&self) -> Weekday {
        weekday_from_fixed(self.fixed)
    }

    pub fn is_shabbat(&self) -> bool {
        self.weekday() == Weekday::Sat
    }

    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    pub fn days_in_month(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    pub fn days_in_year(&self) -> u16 {
        days_in_year(self.year)
    }

    /// 1-based day of the year counted from 1 Tishrei.
    pub fn day_of_year(&self) -> u16 {
        (self.fixed - new_year_fixed(self.year) + 1) as u16
    }

    /// Date `n` days later (or earlier for negative `n`).
    pub fn add_days(&self, n: i64) -> Result<Self, CalendarError> {
        Self::from_fixed(self.fixed + n)
    }

    pub fn next_day(&self) -> Result<Self, CalendarError> {
        self.add_days(1)
    }

    pub fn prev_day(&self) -> Result<Self, CalendarError> {
        self.add_days(-1)
    }

    /// Nearest `weekday` on or before this date.
    pub fn weekday_on_or_before(&self, weekday: Weekday) -> Result<Self, CalendarError> {
        Self::from_fixed(zmanim_time::weekday_on_or_before(weekday, self.fixed))
    }

    /// Nearest `weekday` on or after this date.
    pub fn weekday_on_or_after(&self, weekday: Weekday) -> Result<Self, CalendarError> {
        Self::from_fixed(zmanim_time::weekday_on_or_before(weekday, self.fixed + 6))
    }

    /// This date if it is Shabbat, otherwise the coming Shabbat.
    pub fn upcoming_shabbat(&self) -> Result<Self, CalendarError> {
        self.weekday_on_or_after(Weekday::Sat)
    }

    /// The first Shabbat strictly after this date.
    pub fn next_shabbat(&self) -> Result<Self, CalendarError> {
        Self::from_fixed(zmanim_time::weekday_on_or_before(Weekday::Sat, self.fixed + 7))
    }

    /// The same day and month in another year, clamped to the month length.
    ///
    /// Adar II maps to Adar in a common year.
    pub fn with_year(&self, year: i32) -> Result<Self, CalendarError> {
        let month = if self.month.occurs_in(year) {
            self.month
        } else {
            HebrewMonth::Adar
        };
        check_year(year)?;
        let day = self.day.min(days_in_month(year, month));
        Self::new(year, month, day)
    }

    /// Month name as used in this year ("Adar I" in leap years).
    pub fn month_name(&self) -> &'static str {
        self.month.name_in_year(self.year)
    }
}

impl PartialOrd for HebrewDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HebrewDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fixed.cmp(&other.fixed)
    }
}

impl Display for HebrewDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.day, self.month_name(), self.year)
    }
}

//! Hebrew calendar engine.
//!
//! This crate provides:
//! - [`HebrewDate`]: immutable Hebrew date with fixed-day conversion
//! - Year arithmetic: leap cycle, molad accumulation, dechiyot and kviah
//! - [`molad`] of any month to chalakim precision
//! - Festivals, fasts and Israeli national days ([`holidays_on`]) and the
//!   [`DayTags`] classification used by the zman rule engine
//! - Omer count, weekly parasha and Daf Yomi
//!
//! All arithmetic is exact integer arithmetic on fixed (R.D.) days.

pub mod daf_yomi;
pub mod day_tag;
pub mod error;
pub mod hebrew_date;
pub mod holidays;
pub mod molad;
pub mod month;
pub mod omer;
pub mod parasha;
pub mod year;

pub use daf_yomi::{ALL_TRACTATES, DafYomi, Tractate, daf_yomi};
pub use day_tag::{ALL_DAY_TAGS, DayTag, DayTags, day_tags};
pub use error::CalendarError;
pub use hebrew_date::{HebrewDate, MAX_HEBREW_YEAR};
pub use holidays::{
    ALL_HOLIDAYS, Holiday, HolidayEvent, HolidayInfo, HolidayKind, chanukah_day, holidays_on,
    is_fast_day, is_rosh_chodesh, is_yom_tov,
};
pub use molad::{Molad, molad};
pub use month::{ALL_MONTHS, HebrewMonth, months_of_year};
pub use omer::{OMER_DAYS, omer_day, omer_weeks_and_days};
pub use parasha::{ALL_PARSHIYOT, Parasha, ParashaSchedule, Parsha, parasha_on, upcoming_parasha};
pub use year::{
    HEBREW_EPOCH_FIXED, Kviah, cheshvan_kislev_kviah, days_in_month, days_in_year, elapsed_days,
    is_leap_year, months_elapsed, months_in_year, new_year_fixed,
};

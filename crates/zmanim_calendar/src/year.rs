//! Hebrew year arithmetic: leap cycle, molad accumulation and dechiyot.
//!
//! Day numbers here are counted from the calendar epoch: day 1 is the
//! Monday on which the year-1 molad (BeHaRaD) fell. Weekday of day `d` is
//! `d % 7` with 0 = Sunday, matching fixed (R.D.) days.
//!
//! Source: Maimonides, *Hilchot Kiddush HaChodesh* ch. 6–8; Dershowitz &
//! Reingold, *Calendrical Calculations*, ch. 8.

use serde::{Deserialize, Serialize};

use crate::month::HebrewMonth;

/// Fixed day of 1 Tishrei AM 1 minus one (R.D. of the epoch's day 0).
pub const HEBREW_EPOCH_FIXED: i64 = -1_373_428;

/// Parts (chalakim) in one hour.
pub const CHALAKIM_PER_HOUR: i64 = 1080;
/// Parts in one day.
pub const CHALAKIM_PER_DAY: i64 = 24 * CHALAKIM_PER_HOUR;
/// Mean synodic month: 29 days 12 hours 793 parts.
pub const CHALAKIM_PER_MONTH: i64 = 29 * CHALAKIM_PER_DAY + 12 * CHALAKIM_PER_HOUR + 793;
/// Molad of Tishrei AM 1 (BeHaRaD: day 2, 5 hours, 204 parts), counted
/// from the evening that began the epoch day 0.
pub const MOLAD_BEHARAD_CHALAKIM: i64 = CHALAKIM_PER_DAY + 5 * CHALAKIM_PER_HOUR + 204;

/// Molad at or after noon (18 hours from the preceding evening).
const MOLAD_ZAKEN: i64 = 18 * CHALAKIM_PER_HOUR;
/// GaTRaD: Tuesday, 9 hours 204 parts, common year.
const GATRAD: i64 = 9 * CHALAKIM_PER_HOUR + 204;
/// BeTuTaKPaT: Monday, 15 hours 589 parts, following a leap year.
const BETUTAKPAT: i64 = 15 * CHALAKIM_PER_HOUR + 589;

/// Whether `year` is one of the seven leap years of its 19-year cycle
/// (positions 3, 6, 8, 11, 14, 17, 19).
pub const fn is_leap_year(year: i32) -> bool {
    (7 * year as i64 + 1).rem_euclid(19) < 7
}

/// 13 for leap years, else 12.
pub const fn months_in_year(year: i32) -> u8 {
    if is_leap_year(year) { 13 } else { 12 }
}

/// Lunar months from the epoch to Tishrei of `year`.
pub const fn months_elapsed(year: i32) -> i64 {
    (235 * year as i64 - 234).div_euclid(19)
}

/// Chalakim from the epoch evening to the molad of Tishrei of `year`.
pub const fn molad_tishrei_chalakim(year: i32) -> i64 {
    MOLAD_BEHARAD_CHALAKIM + months_elapsed(year) * CHALAKIM_PER_MONTH
}

/// Days from the epoch to 1 Tishrei of `year`, after all postponements.
///
/// Molad Zaken, GaTRaD and BeTuTaKPaT each move the day forward by one;
/// Lo ADU Rosh then moves a Sunday, Wednesday or Friday forward again.
pub fn elapsed_days(year: i32) -> i64 {
    let total = molad_tishrei_chalakim(year);
    let mut day = total.div_euclid(CHALAKIM_PER_DAY);
    let parts = total.rem_euclid(CHALAKIM_PER_DAY);

    let weekday = day.rem_euclid(7);
    if parts >= MOLAD_ZAKEN
        || (weekday == 2 && parts >= GATRAD && !is_leap_year(year))
        || (weekday == 1 && parts >= BETUTAKPAT && is_leap_year(year - 1))
    {
        day += 1;
    }
    if matches!(day.rem_euclid(7), 0 | 3 | 5) {
        day += 1;
    }
    day
}

/// Fixed day of 1 Tishrei of `year`.
pub fn new_year_fixed(year: i32) -> i64 {
    HEBREW_EPOCH_FIXED + elapsed_days(year)
}

/// Length of `year` in days: 353–355 or 383–385.
pub fn days_in_year(year: i32) -> u16 {
    (elapsed_days(year + 1) - elapsed_days(year)) as u16
}

/// Cheshvan/Kislev pattern of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kviah {
    /// Both Cheshvan and Kislev have 29 days.
    Chaserah,
    /// Cheshvan 29, Kislev 30.
    Kesidran,
    /// Both have 30 days.
    Shelemah,
}

impl Kviah {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chaserah => "deficient",
            Self::Kesidran => "regular",
            Self::Shelemah => "complete",
        }
    }
}

/// Kviah of `year`, from its length.
pub fn cheshvan_kislev_kviah(year: i32) -> Kviah {
    match days_in_year(year) % 10 {
        3 => Kviah::Chaserah,
        5 => Kviah::Shelemah,
        _ => Kviah::Kesidran,
    }
}

pub fn is_long_cheshvan(year: i32) -> bool {
    cheshvan_kislev_kviah(year) == Kviah::Shelemah
}

pub fn is_short_kislev(year: i32) -> bool {
    cheshvan_kislev_kviah(year) == Kviah::Chaserah
}

/// Days in `month` of `year`; 0 for Adar II in a common year.
pub fn days_in_month(year: i32, month: HebrewMonth) -> u8 {
    use HebrewMonth::*;
    match month {
        Iyar | Tamuz | Elul | Tevet | AdarII => {
            if month.occurs_in(year) {
                29
            } else {
                0
            }
        }
        Adar if !is_leap_year(year) => 29,
        Cheshvan if !is_long_cheshvan(year) => 29,
        Kislev if is_short_kislev(year) => 29,
        _ => 30,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_positions_in_cycle() {
        let leaps: Vec<i32> = (1..=19).filter(|y| is_leap_year(*y)).collect();
        assert_eq!(leaps, vec![3, 6, 8, 11, 14, 17, 19]);
    }

    #[test]
    fn months_per_year_matches_leap_flag() {
        assert_eq!(months_in_year(5784), 13);
        assert_eq!(months_in_year(5785), 12);
    }

    #[test]
    fn rosh_hashana_5785_day_count() {
        assert_eq!(elapsed_days(5785), 2_112_590);
        assert_eq!(new_year_fixed(5785), 739_162);
    }

    #[test]
    fn year_one_starts_monday() {
        assert_eq!(elapsed_days(1), 1);
        assert_eq!(new_year_fixed(1).rem_euclid(7), 1);
    }

    #[test]
    fn known_year_lengths() {
        assert_eq!(days_in_year(5782), 384);
        assert_eq!(days_in_year(5784), 383);
        assert_eq!(days_in_year(5785), 355);
        assert_eq!(days_in_year(5786), 354);
        assert_eq!(days_in_year(5781), 353);
    }

    #[test]
    fn kviah_from_length() {
        assert_eq!(cheshvan_kislev_kviah(5781), Kviah::Chaserah);
        assert_eq!(cheshvan_kislev_kviah(5786), Kviah::Kesidran);
        assert_eq!(cheshvan_kislev_kviah(5785), Kviah::Shelemah);
        assert_eq!(days_in_month(5785, HebrewMonth::Cheshvan), 30);
        assert_eq!(days_in_month(5781, HebrewMonth::Kislev), 29);
    }

    #[test]
    fn adar_lengths() {
        assert_eq!(days_in_month(5784, HebrewMonth::Adar), 30);
        assert_eq!(days_in_month(5784, HebrewMonth::AdarII), 29);
        assert_eq!(days_in_month(5785, HebrewMonth::Adar), 29);
        assert_eq!(days_in_month(5785, HebrewMonth::AdarII), 0);
    }

    #[test]
    fn month_lengths_sum_to_year_length() {
        for year in 5700..5800 {
            let sum: u16 = crate::month::months_of_year(year)
                .map(|m| days_in_month(year, m) as u16)
                .sum();
            assert_eq!(sum, days_in_year(year), "year {year}");
        }
    }

    #[test]
    fn year_lengths_are_valid() {
        for year in 1..6000 {
            let n = days_in_year(year);
            assert!(
                matches!(n, 353 | 354 | 355 | 383 | 384 | 385),
                "year {year} has {n} days"
            );
        }
    }
}

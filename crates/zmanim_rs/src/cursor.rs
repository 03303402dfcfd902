//! Day-by-day iteration with calendar metadata.

use chrono::NaiveDate;

use zmanim_calendar::{
    DayTags, HebrewDate, HebrewMonth, HolidayEvent, Parasha, day_tags, holidays_on, omer_day,
    parasha_on,
};
use zmanim_time::{days_in_gregorian_month, fixed_from_gregorian, naive_from_fixed};

use crate::error::ZmanimError;

/// Calendar facts for one civil date.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub hebrew: HebrewDate,
    pub tags: DayTags,
    pub holidays: Vec<HolidayEvent>,
    pub omer: Option<u8>,
    /// Weekly reading, on Shabbat only.
    pub parasha: Option<Parasha>,
}

impl CalendarDay {
    pub fn new(date: NaiveDate, in_israel: bool) -> Result<Self, ZmanimError> {
        let hebrew = HebrewDate::from_gregorian(date)?;
        let parasha = if hebrew.is_shabbat() {
            parasha_on(&hebrew, in_israel)?
        } else {
            None
        };
        Ok(Self {
            date,
            hebrew,
            tags: day_tags(&hebrew, in_israel),
            holidays: holidays_on(&hebrew, in_israel),
            omer: omer_day(&hebrew),
            parasha,
        })
    }
}

/// Owned iterator over an inclusive range of civil dates.
#[derive(Debug, Clone)]
pub struct DayCursor {
    next: Option<NaiveDate>,
    last: NaiveDate,
    in_israel: bool,
}

impl DayCursor {
    /// Dates `first..=last`; empty when `last < first`.
    pub fn new(first: NaiveDate, last: NaiveDate, in_israel: bool) -> Self {
        Self {
            next: (first <= last).then_some(first),
            last,
            in_israel,
        }
    }

    /// Every day of a Hebrew month.
    pub fn hebrew_month(year: i32, month: HebrewMonth, in_israel: bool) -> Result<Self, ZmanimError> {
        let first = HebrewDate::new(year, month, 1)?;
        let last = HebrewDate::new(year, month, first.days_in_month())?;
        Ok(Self::new(first.to_gregorian()?, last.to_gregorian()?, in_israel))
    }

    /// Every day of a Gregorian month.
    pub fn gregorian_month(year: i32, month: u32, in_israel: bool) -> Result<Self, ZmanimError> {
        let fixed = fixed_from_gregorian(year, month, 1)?;
        let days = i64::from(days_in_gregorian_month(year, month));
        let first = naive_from_fixed(fixed)?;
        let last = naive_from_fixed(fixed + days - 1)?;
        Ok(Self::new(first, last, in_israel))
    }
}

impl Iterator for DayCursor {
    type Item = Result<CalendarDay, ZmanimError>;

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.next?;
        self.next = date.succ_opt().filter(|d| *d <= self.last);
        Some(CalendarDay::new(date, self.in_israel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zmanim_calendar::{DayTag, Holiday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn nisan_5784_has_30_days() {
        let days: Vec<_> = DayCursor::hebrew_month(5784, HebrewMonth::Nisan, false)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(days.len(), 30);
        assert_eq!(days[0].date, date(2024, 4, 9));
        assert!(days[14].tags.contains(DayTag::YomTov));
        assert!(days[14].holidays.iter().any(|h| h.holiday == Holiday::Pesach));
        assert_eq!(days[15].omer, Some(1));
    }

    #[test]
    fn parasha_only_on_shabbat() {
        let days: Vec<_> = DayCursor::new(date(2024, 11, 10), date(2024, 11, 16), false)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(days.len(), 7);
        assert!(days[..6].iter().all(|d| d.parasha.is_none()));
        assert!(days[6].parasha.is_some());
    }

    #[test]
    fn empty_and_gregorian_ranges() {
        assert_eq!(DayCursor::new(date(2024, 1, 2), date(2024, 1, 1), false).count(), 0);
        assert_eq!(DayCursor::gregorian_month(2024, 2, false).unwrap().count(), 29);
        assert!(DayCursor::gregorian_month(2024, 13, false).is_err());
    }
}

//! Counting of the Omer: 49 days from 16 Nisan to 5 Sivan.

use crate::hebrew_date::HebrewDate;
use crate::month::HebrewMonth;

/// Days in the count.
pub const OMER_DAYS: u8 = 49;

/// Omer day (1..=49) counted on the evening that begins `date`'s daytime,
/// or `None` outside the count.
pub fn omer_day(date: &HebrewDate) -> Option<u8> {
    let start = HebrewDate::new(date.year(), HebrewMonth::Nisan, 16).ok()?;
    let n = date.to_fixed() - start.to_fixed() + 1;
    (1..=i64::from(OMER_DAYS)).contains(&n).then(|| n as u8)
}

/// (weeks, remaining days) of an Omer day.
pub const fn omer_weeks_and_days(day: u8) -> (u8, u8) {
    (day / 7, day % 7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        let y = 5785;
        let first = HebrewDate::new(y, HebrewMonth::Nisan, 16).unwrap();
        let last = HebrewDate::new(y, HebrewMonth::Sivan, 5).unwrap();
        assert_eq!(omer_day(&first), Some(1));
        assert_eq!(omer_day(&last), Some(49));
        assert_eq!(omer_day(&first.prev_day().unwrap()), None);
        assert_eq!(omer_day(&last.next_day().unwrap()), None);
    }

    #[test]
    fn lag_baomer_is_day_33() {
        let d = HebrewDate::new(5785, HebrewMonth::Iyar, 18).unwrap();
        assert_eq!(omer_day(&d), Some(33));
        assert_eq!(omer_weeks_and_days(33), (4, 5));
    }

    #[test]
    fn tishrei_is_outside_count() {
        let d = HebrewDate::new(5785, HebrewMonth::Tishrei, 16).unwrap();
        assert_eq!(omer_day(&d), None);
    }
}

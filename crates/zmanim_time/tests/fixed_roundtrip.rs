//! Fixed-day conversions checked against chrono's own day count.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use zmanim_time::{
    MAX_FIXED, MIN_FIXED, fixed_from_naive, gregorian_from_fixed, naive_from_fixed,
    weekday_from_fixed,
};

proptest! {
    #[test]
    fn fixed_matches_chrono_day_count(fixed in MIN_FIXED..=MAX_FIXED) {
        let date = naive_from_fixed(fixed).unwrap();
        prop_assert_eq!(date.num_days_from_ce() as i64, fixed);
        prop_assert_eq!(fixed_from_naive(date).unwrap(), fixed);
    }

    #[test]
    fn weekday_matches_chrono(fixed in MIN_FIXED..=MAX_FIXED) {
        let date = naive_from_fixed(fixed).unwrap();
        prop_assert_eq!(weekday_from_fixed(fixed), date.weekday());
    }
}

#[test]
fn consecutive_days_are_contiguous() {
    let start = fixed_from_naive(NaiveDate::from_ymd_opt(1899, 12, 25).unwrap()).unwrap();
    let mut prev = gregorian_from_fixed(start).unwrap();
    for f in start + 1..start + 800 {
        let next = gregorian_from_fixed(f).unwrap();
        let p = NaiveDate::from_ymd_opt(prev.0, prev.1, prev.2).unwrap();
        let n = NaiveDate::from_ymd_opt(next.0, next.1, next.2).unwrap();
        assert_eq!(p.succ_opt(), Some(n));
        prev = next;
    }
}

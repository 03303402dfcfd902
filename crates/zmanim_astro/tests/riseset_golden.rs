//! Rise/set behaviour across a year at several latitudes.

use chrono::{NaiveDate, TimeDelta, Timelike};
use proptest::prelude::*;
use zmanim_astro::{AstronomicalDay, GeoCoordinate, SolarInstant};

fn jerusalem() -> GeoCoordinate {
    GeoCoordinate::new("Jerusalem", 31.7767, 35.2345, 754.0, "Asia/Jerusalem").unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn jerusalem_first_day_of_pesach_5784() {
    // 2024-04-23, IDT (UTC+3)
    let day = AstronomicalDay::new(date(2024, 4, 23), jerusalem());
    let tz = day.geo().time_zone();
    let rise = day.sea_level_sunrise().instant().unwrap().with_timezone(&tz);
    let set = day.sea_level_sunset().instant().unwrap().with_timezone(&tz);
    assert_eq!(rise.hour(), 6);
    assert!(rise.minute() <= 8, "sunrise {rise}");
    assert_eq!(set.hour(), 19);
    assert!((8..=18).contains(&set.minute()), "sunset {set}");
}

#[test]
fn monotonic_through_a_year_in_jerusalem() {
    let geo = jerusalem();
    let mut d = date(2024, 1, 1);
    while d < date(2025, 1, 1) {
        let day = AstronomicalDay::new(d, geo.clone());
        let rise = day.sunrise().instant().unwrap();
        let noon = day.solar_noon().instant().unwrap();
        let set = day.sunset().instant().unwrap();
        assert!(rise < noon && noon < set, "{d}");
        let dawn = day.astronomical_dawn().instant().unwrap();
        let dusk = day.astronomical_dusk().instant().unwrap();
        assert!(dawn < rise && set < dusk, "{d}");
        d += TimeDelta::days(1);
    }
}

#[test]
fn seventy_north_loses_sunset_in_summer() {
    let geo = GeoCoordinate::new("70N", 70.0, 23.0, 0.0, "Europe/Oslo").unwrap();
    let summer = AstronomicalDay::new(date(2024, 6, 21), geo.clone());
    assert_eq!(summer.sea_level_sunset(), SolarInstant::Unavailable);
    let winter = AstronomicalDay::new(date(2024, 12, 21), geo.clone());
    assert_eq!(winter.sea_level_sunrise(), SolarInstant::Unavailable);
    let spring = AstronomicalDay::new(date(2024, 3, 20), geo);
    assert!(spring.sea_level_sunrise().is_available());
    assert!(spring.sea_level_sunset().is_available());
}

proptest! {
    #[test]
    fn rise_noon_set_ordered_away_from_poles(
        lat in -60.0f64..60.0,
        lon in -179.0f64..179.0,
        offset in 0i64..3650,
    ) {
        let geo = GeoCoordinate::new("p", lat, lon, 0.0, "UTC").unwrap();
        let d = date(2020, 1, 1) + TimeDelta::days(offset);
        let day = AstronomicalDay::new(d, geo);
        let rise = day.sea_level_sunrise().instant().unwrap();
        let noon = day.solar_noon().instant().unwrap();
        let set = day.sea_level_sunset().instant().unwrap();
        prop_assert!(rise < noon);
        prop_assert!(noon < set);
    }
}

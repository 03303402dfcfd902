//! Named solar events for one local date at one location.
//!
//! Wraps the NOAA calculator: applies the antimeridian day shift before
//! solving, converts fractional UTC hours back to instants on the right UTC
//! date, and reports non-events as [`SolarInstant::Unavailable`].

use chrono::{NaiveDate, TimeDelta};
use tracing::trace;

use zmanim_time::utc_from_hours;

use crate::geo::GeoCoordinate;
use crate::noaa;
use crate::riseset_types::{
    ASTRONOMICAL_ZENITH, CIVIL_ZENITH, GEOMETRIC_ZENITH, NAUTICAL_ZENITH, RiseSetResult,
    SolarEvent, SolarInstant,
};

/// Whole-hour offset of the nominal time zone for `longitude`.
fn nominal_zone_hours(longitude: f64) -> f64 {
    (longitude / 15.0).round()
}

/// Solar events for a single civil date at a [`GeoCoordinate`].
#[derive(Debug, Clone, PartialEq)]
pub struct AstronomicalDay {
    date: NaiveDate,
    calc_date: NaiveDate,
    geo: GeoCoordinate,
}

impl AstronomicalDay {
    pub fn new(date: NaiveDate, geo: GeoCoordinate) -> Self {
        let shift = geo.antimeridian_adjustment(date);
        let calc_date = date
            .checked_add_signed(TimeDelta::days(shift))
            .unwrap_or(date);
        Self {
            date,
            calc_date,
            geo,
        }
    }

    /// The local civil date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The date whose sun geometry is solved (differs across the antimeridian).
    pub fn calculation_date(&self) -> NaiveDate {
        self.calc_date
    }

    pub fn geo(&self) -> &GeoCoordinate {
        &self.geo
    }

    /// The same location one day later.
    pub fn next_day(&self) -> Option<Self> {
        self.date
            .succ_opt()
            .map(|d| Self::new(d, self.geo.clone()))
    }

    /// The same location one day earlier.
    pub fn prev_day(&self) -> Option<Self> {
        self.date
            .pred_opt()
            .map(|d| Self::new(d, self.geo.clone()))
    }

    fn to_instant(&self, result: RiseSetResult, event: SolarEvent) -> SolarInstant {
        let Some(hours) = result.utc_hours() else {
            trace!(?event, ?result, date = %self.date, "solar event unavailable");
            return SolarInstant::Unavailable;
        };
        let local_hours = nominal_zone_hours(self.geo.longitude()) + hours;
        let day_shift = match event {
            SolarEvent::Sunrise if local_hours > 18.0 => -1,
            SolarEvent::Sunset if local_hours < 6.0 => 1,
            SolarEvent::Noon if local_hours > 18.0 => -1,
            SolarEvent::Noon if local_hours < 6.0 => 1,
            SolarEvent::Midnight if local_hours < 12.0 => 1,
            _ => 0,
        };
        match self.calc_date.checked_add_signed(TimeDelta::days(day_shift)) {
            Some(d) => SolarInstant::At(utc_from_hours(d, hours)),
            None => SolarInstant::Unavailable,
        }
    }

    /// Sunrise with the horizon dip for the coordinate's elevation.
    pub fn sunrise(&self) -> SolarInstant {
        let r = noaa::sunrise_utc(self.calc_date, &self.geo, GEOMETRIC_ZENITH, true);
        self.to_instant(r, SolarEvent::Sunrise)
    }

    /// Sunrise at sea level.
    pub fn sea_level_sunrise(&self) -> SolarInstant {
        let r = noaa::sunrise_utc(self.calc_date, &self.geo, GEOMETRIC_ZENITH, false);
        self.to_instant(r, SolarEvent::Sunrise)
    }

    /// Sunset with the horizon dip for the coordinate's elevation.
    pub fn sunset(&self) -> SolarInstant {
        let r = noaa::sunset_utc(self.calc_date, &self.geo, GEOMETRIC_ZENITH, true);
        self.to_instant(r, SolarEvent::Sunset)
    }

    /// Sunset at sea level.
    pub fn sea_level_sunset(&self) -> SolarInstant {
        let r = noaa::sunset_utc(self.calc_date, &self.geo, GEOMETRIC_ZENITH, false);
        self.to_instant(r, SolarEvent::Sunset)
    }

    /// Elevation or sea-level sunrise, by flag.
    pub fn sunrise_for(&self, use_elevation: bool) -> SolarInstant {
        if use_elevation {
            self.sunrise()
        } else {
            self.sea_level_sunrise()
        }
    }

    /// Elevation or sea-level sunset, by flag.
    pub fn sunset_for(&self, use_elevation: bool) -> SolarInstant {
        if use_elevation {
            self.sunset()
        } else {
            self.sea_level_sunset()
        }
    }

    /// Morning crossing of an arbitrary zenith, e.g. `90.0 + 16.1` for dawn.
    pub fn sunrise_offset_by_degrees(&self, zenith_deg: f64) -> SolarInstant {
        let r = noaa::offset_by_degrees(self.calc_date, &self.geo, SolarEvent::Sunrise, zenith_deg);
        self.to_instant(r, SolarEvent::Sunrise)
    }

    /// Evening crossing of an arbitrary zenith.
    pub fn sunset_offset_by_degrees(&self, zenith_deg: f64) -> SolarInstant {
        let r = noaa::offset_by_degrees(self.calc_date, &self.geo, SolarEvent::Sunset, zenith_deg);
        self.to_instant(r, SolarEvent::Sunset)
    }

    pub fn solar_noon(&self) -> SolarInstant {
        let hours = noaa::solar_noon_utc(self.calc_date, &self.geo);
        self.to_instant(RiseSetResult::Event { utc_hours: hours }, SolarEvent::Noon)
    }

    /// Lower transit in the night after this date.
    pub fn solar_midnight(&self) -> SolarInstant {
        let hours = noaa::solar_midnight_utc(self.calc_date, &self.geo);
        self.to_instant(RiseSetResult::Event { utc_hours: hours }, SolarEvent::Midnight)
    }

    pub fn civil_dawn(&self) -> SolarInstant {
        self.sunrise_offset_by_degrees(CIVIL_ZENITH)
    }

    pub fn civil_dusk(&self) -> SolarInstant {
        self.sunset_offset_by_degrees(CIVIL_ZENITH)
    }

    pub fn nautical_dawn(&self) -> SolarInstant {
        self.sunrise_offset_by_degrees(NAUTICAL_ZENITH)
    }

    pub fn nautical_dusk(&self) -> SolarInstant {
        self.sunset_offset_by_degrees(NAUTICAL_ZENITH)
    }

    pub fn astronomical_dawn(&self) -> SolarInstant {
        self.sunrise_offset_by_degrees(ASTRONOMICAL_ZENITH)
    }

    pub fn astronomical_dusk(&self) -> SolarInstant {
        self.sunset_offset_by_degrees(ASTRONOMICAL_ZENITH)
    }
}

//! Types for sunrise/sunset and twilight calculations.
//!
//! Provides zenith constants, event kinds and result types used by the
//! NOAA calculator and [`AstronomicalDay`](crate::AstronomicalDay).

use chrono::{DateTime, TimeDelta, Utc};

/// Sun centre on the geometric horizon.
pub const GEOMETRIC_ZENITH: f64 = 90.0;
/// Sun centre 6° below the horizon.
pub const CIVIL_ZENITH: f64 = 96.0;
/// Sun centre 12° below the horizon.
pub const NAUTICAL_ZENITH: f64 = 102.0;
/// Sun centre 18° below the horizon.
pub const ASTRONOMICAL_ZENITH: f64 = 108.0;

/// Atmospheric refraction at the horizon in degrees (34′).
pub const REFRACTION_DEG: f64 = 34.0 / 60.0;
/// Mean solar semi-diameter in degrees (16′).
pub const SOLAR_RADIUS_DEG: f64 = 16.0 / 60.0;
/// Earth radius in km used for the horizon dip.
pub const EARTH_RADIUS_KM: f64 = 6356.9;

/// Kind of solar event being solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolarEvent {
    /// Morning crossing of a zenith.
    Sunrise,
    /// Evening crossing of a zenith.
    Sunset,
    /// Upper transit.
    Noon,
    /// Lower transit.
    Midnight,
}

impl SolarEvent {
    /// Whether this is a morning event.
    pub fn is_rising(self) -> bool {
        matches!(self, Self::Sunrise)
    }
}

/// Result of a single NOAA rise/set solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiseSetResult {
    /// Event at `utc_hours` past 00:00 UTC of the calculation date, in [0, 24).
    Event { utc_hours: f64 },
    /// The sun stays below the requested zenith all day (polar night).
    NeverRises,
    /// The sun stays above the requested zenith all day (midnight sun).
    NeverSets,
}

impl RiseSetResult {
    pub fn utc_hours(self) -> Option<f64> {
        match self {
            Self::Event { utc_hours } => Some(utc_hours),
            Self::NeverRises | Self::NeverSets => None,
        }
    }
}

/// A solar instant, or the explicit absence of one.
///
/// `Unavailable` is never turned into a wall-clock default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SolarInstant {
    Unavailable,
    At(DateTime<Utc>),
}

impl SolarInstant {
    pub fn instant(self) -> Option<DateTime<Utc>> {
        match self {
            Self::At(t) => Some(t),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Self::At(_))
    }

    /// Shift by a signed duration; unavailability propagates.
    pub fn offset(self, delta: TimeDelta) -> Self {
        match self {
            Self::At(t) => Self::At(t + delta),
            Self::Unavailable => Self::Unavailable,
        }
    }

    /// Shift by fractional minutes, kept to millisecond precision.
    pub fn offset_minutes(self, minutes: f64) -> Self {
        self.offset(TimeDelta::milliseconds((minutes * 60_000.0).round() as i64))
    }
}

impl From<Option<DateTime<Utc>>> for SolarInstant {
    fn from(t: Option<DateTime<Utc>>) -> Self {
        t.map_or(Self::Unavailable, Self::At)
    }
}

impl From<DateTime<Utc>> for SolarInstant {
    fn from(t: DateTime<Utc>) -> Self {
        Self::At(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn zenith_ladder() {
        assert_eq!(CIVIL_ZENITH - GEOMETRIC_ZENITH, 6.0);
        assert_eq!(NAUTICAL_ZENITH - GEOMETRIC_ZENITH, 12.0);
        assert_eq!(ASTRONOMICAL_ZENITH - GEOMETRIC_ZENITH, 18.0);
    }

    #[test]
    fn only_sunrise_is_rising() {
        assert!(SolarEvent::Sunrise.is_rising());
        assert!(!SolarEvent::Sunset.is_rising());
        assert!(!SolarEvent::Noon.is_rising());
    }

    #[test]
    fn non_events_have_no_hours() {
        assert_eq!(RiseSetResult::NeverRises.utc_hours(), None);
        assert_eq!(RiseSetResult::NeverSets.utc_hours(), None);
        assert_eq!(RiseSetResult::Event { utc_hours: 5.5 }.utc_hours(), Some(5.5));
    }

    #[test]
    fn unavailable_propagates_through_offsets() {
        let u = SolarInstant::Unavailable;
        assert_eq!(u.offset_minutes(18.0), SolarInstant::Unavailable);
        assert_eq!(u.instant(), None);
    }

    #[test]
    fn offset_minutes_shifts_instant() {
        let t = Utc.with_ymd_and_hms(2024, 4, 22, 16, 0, 0).unwrap();
        let s = SolarInstant::At(t).offset_minutes(-18.0);
        assert_eq!(s.instant(), Some(Utc.with_ymd_and_hms(2024, 4, 22, 15, 42, 0).unwrap()));
    }
}

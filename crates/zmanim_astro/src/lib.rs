//! Solar rise/set calculations for halachic times.
//!
//! This crate provides:
//! - [`GeoCoordinate`]: validated observer location with IANA zone and
//!   geodesic helpers
//! - The NOAA solar calculator ([`noaa`]) for sunrise, sunset, transit and
//!   arbitrary-zenith twilight
//! - [`AstronomicalDay`]: the named solar events of one local date
//!
//! Polar non-events are returned as [`SolarInstant::Unavailable`], never as
//! errors and never as a default time.

pub mod astronomical_day;
pub mod error;
pub mod geo;
pub mod noaa;
pub mod riseset_types;

pub use astronomical_day::AstronomicalDay;
pub use error::AstroError;
pub use geo::{GeoCoordinate, GeodesicInverse};
pub use noaa::{
    elevation_adjusted_zenith, elevation_adjustment, offset_by_degrees, solar_midnight_utc,
    solar_noon_utc, sunrise_utc, sunset_utc,
};
pub use riseset_types::{
    ASTRONOMICAL_ZENITH, CIVIL_ZENITH, GEOMETRIC_ZENITH, NAUTICAL_ZENITH, RiseSetResult,
    SolarEvent, SolarInstant,
};

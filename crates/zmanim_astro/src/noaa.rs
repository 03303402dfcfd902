//! NOAA solar position and rise/set calculator.
//!
//! Julian day → centuries → mean longitude/anomaly → equation of centre →
//! apparent longitude → obliquity → declination and equation of time →
//! hour-angle solve. Rise and set use two passes: the first evaluates the
//! sun at local transit, the second at the first-pass event time.
//!
//! Longitudes inside this module follow the NOAA convention (west positive);
//! public functions take a [`GeoCoordinate`] and negate internally.
//!
//! Sources: NOAA Global Monitoring Laboratory solar calculator; Meeus,
//! *Astronomical Algorithms*, ch. 25 and 28.

use chrono::{Datelike, NaiveDate};
use tracing::trace;

use zmanim_time::{calendar_to_jd, jd_to_centuries};

use crate::geo::GeoCoordinate;
use crate::riseset_types::{
    EARTH_RADIUS_KM, GEOMETRIC_ZENITH, REFRACTION_DEG, RiseSetResult, SOLAR_RADIUS_DEG, SolarEvent,
};

const MINUTES_PER_DAY: f64 = 1440.0;

/// Julian Date at 00:00 UTC of a calendar date.
pub fn julian_day(date: NaiveDate) -> f64 {
    calendar_to_jd(date.year(), date.month(), date.day() as f64)
}

/// Geometric mean longitude of the sun, degrees in [0, 360).
pub fn sun_geometric_mean_longitude(t: f64) -> f64 {
    (280.466_46 + t * (36_000.769_83 + 0.000_303_2 * t)).rem_euclid(360.0)
}

/// Geometric mean anomaly of the sun in degrees.
pub fn sun_geometric_mean_anomaly(t: f64) -> f64 {
    357.529_11 + t * (35_999.050_29 - 0.000_153_7 * t)
}

/// Eccentricity of Earth's orbit.
pub fn earth_orbit_eccentricity(t: f64) -> f64 {
    0.016_708_634 - t * (0.000_042_037 + 0.000_000_126_7 * t)
}

/// Equation of centre of the sun in degrees.
pub fn sun_equation_of_center(t: f64) -> f64 {
    let m = sun_geometric_mean_anomaly(t).to_radians();
    m.sin() * (1.914_602 - t * (0.004_817 + 0.000_014 * t))
        + (2.0 * m).sin() * (0.019_993 - 0.000_101 * t)
        + (3.0 * m).sin() * 0.000_289
}

/// True longitude of the sun in degrees.
pub fn sun_true_longitude(t: f64) -> f64 {
    sun_geometric_mean_longitude(t) + sun_equation_of_center(t)
}

fn nutation_omega(t: f64) -> f64 {
    (125.04 - 1934.136 * t).to_radians()
}

/// Apparent longitude of the sun in degrees.
pub fn sun_apparent_longitude(t: f64) -> f64 {
    sun_true_longitude(t) - 0.005_69 - 0.004_78 * nutation_omega(t).sin()
}

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity_of_ecliptic(t: f64) -> f64 {
    let seconds = 21.448 - t * (46.815_0 + t * (0.000_59 - t * 0.001_813));
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

/// Obliquity corrected for nutation, in degrees.
pub fn obliquity_correction(t: f64) -> f64 {
    mean_obliquity_of_ecliptic(t) + 0.002_56 * nutation_omega(t).cos()
}

/// Solar declination in degrees.
pub fn sun_declination(t: f64) -> f64 {
    let e = obliquity_correction(t).to_radians();
    let lambda = sun_apparent_longitude(t).to_radians();
    (e.sin() * lambda.sin()).asin().to_degrees()
}

/// Equation of time in minutes of time.
pub fn equation_of_time(t: f64) -> f64 {
    let epsilon = obliquity_correction(t).to_radians();
    let l0 = sun_geometric_mean_longitude(t).to_radians();
    let e = earth_orbit_eccentricity(t);
    let m = sun_geometric_mean_anomaly(t).to_radians();
    let y = (epsilon / 2.0).tan().powi(2);

    let eot = y * (2.0 * l0).sin() - 2.0 * e * m.sin()
        + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();
    eot.to_degrees() * 4.0
}

/// Hour angle in radians at which the sun reaches `zenith_deg`.
///
/// Negative for sunset. Returns a non-event when the cosine leaves [-1, 1].
fn sun_hour_angle(
    latitude: f64,
    declination: f64,
    zenith_deg: f64,
    event: SolarEvent,
) -> Result<f64, RiseSetResult> {
    let lat = latitude.to_radians();
    let dec = declination.to_radians();
    let cos_h = zenith_deg.to_radians().cos() / (lat.cos() * dec.cos()) - lat.tan() * dec.tan();
    if cos_h > 1.0 {
        return Err(RiseSetResult::NeverRises);
    }
    if cos_h < -1.0 {
        return Err(RiseSetResult::NeverSets);
    }
    let h = cos_h.acos();
    Ok(if event == SolarEvent::Sunset { -h } else { h })
}

/// Minutes after 00:00 UTC of transit (noon) or anti-transit (midnight).
fn solar_noon_midnight_minutes(jd: f64, west_longitude: f64, event: SolarEvent) -> f64 {
    let jd = if event == SolarEvent::Midnight { jd + 0.5 } else { jd };
    let t_noon = jd_to_centuries(jd + west_longitude / 360.0);
    let first = west_longitude * 4.0 - equation_of_time(t_noon);
    let t = jd_to_centuries(jd + first / MINUTES_PER_DAY);
    let base = if event == SolarEvent::Midnight { MINUTES_PER_DAY } else { 720.0 };
    base + west_longitude * 4.0 - equation_of_time(t)
}

fn rise_set_minutes(
    jd: f64,
    latitude: f64,
    west_longitude: f64,
    zenith_deg: f64,
    event: SolarEvent,
) -> Result<f64, RiseSetResult> {
    let noon = solar_noon_midnight_minutes(jd, west_longitude, SolarEvent::Noon);
    let mut t = jd_to_centuries(jd + noon / MINUTES_PER_DAY);
    let mut minutes = 0.0;
    for pass in 0..2 {
        let eot = equation_of_time(t);
        let dec = sun_declination(t);
        let h = sun_hour_angle(latitude, dec, zenith_deg, event)?;
        minutes = 720.0 + 4.0 * (west_longitude - h.to_degrees()) - eot;
        trace!(pass, eot, dec, minutes, "noaa rise/set pass");
        t = jd_to_centuries(jd + minutes / MINUTES_PER_DAY);
    }
    Ok(minutes)
}

fn wrap_hours(minutes: f64) -> f64 {
    (minutes / 60.0).rem_euclid(24.0)
}

/// Horizon dip in degrees for an observer `elevation_m` above the surface.
pub fn elevation_adjustment(elevation_m: f64) -> f64 {
    (EARTH_RADIUS_KM / (EARTH_RADIUS_KM + elevation_m / 1000.0))
        .acos()
        .to_degrees()
}

/// Zenith widened for refraction, solar radius and horizon dip.
///
/// Only the geometric zenith (90°) is adjusted; twilight and custom zeniths
/// refer to the sun's centre and are returned unchanged.
pub fn elevation_adjusted_zenith(zenith_deg: f64, elevation_m: f64) -> f64 {
    if zenith_deg == GEOMETRIC_ZENITH {
        zenith_deg + SOLAR_RADIUS_DEG + REFRACTION_DEG + elevation_adjustment(elevation_m)
    } else {
        zenith_deg
    }
}

fn solve(
    date: NaiveDate,
    geo: &GeoCoordinate,
    zenith_deg: f64,
    adjust_for_elevation: bool,
    event: SolarEvent,
) -> RiseSetResult {
    let elevation = if adjust_for_elevation {
        geo.elevation_m()
    } else {
        0.0
    };
    let zenith = elevation_adjusted_zenith(zenith_deg, elevation);
    match rise_set_minutes(julian_day(date), geo.latitude(), -geo.longitude(), zenith, event) {
        Ok(minutes) => RiseSetResult::Event {
            utc_hours: wrap_hours(minutes),
        },
        Err(non_event) => non_event,
    }
}

/// Sunrise for `zenith_deg` as fractional UTC hours of `date`.
pub fn sunrise_utc(
    date: NaiveDate,
    geo: &GeoCoordinate,
    zenith_deg: f64,
    adjust_for_elevation: bool,
) -> RiseSetResult {
    solve(date, geo, zenith_deg, adjust_for_elevation, SolarEvent::Sunrise)
}

/// Sunset for `zenith_deg` as fractional UTC hours of `date`.
pub fn sunset_utc(
    date: NaiveDate,
    geo: &GeoCoordinate,
    zenith_deg: f64,
    adjust_for_elevation: bool,
) -> RiseSetResult {
    solve(date, geo, zenith_deg, adjust_for_elevation, SolarEvent::Sunset)
}

/// Rise or set at an arbitrary zenith, re-solving the hour angle.
///
/// `Noon` and `Midnight` ignore the zenith and return the transit.
pub fn offset_by_degrees(
    date: NaiveDate,
    geo: &GeoCoordinate,
    event: SolarEvent,
    zenith_deg: f64,
) -> RiseSetResult {
    match event {
        SolarEvent::Sunrise | SolarEvent::Sunset => solve(date, geo, zenith_deg, true, event),
        SolarEvent::Noon => RiseSetResult::Event {
            utc_hours: solar_noon_utc(date, geo),
        },
        SolarEvent::Midnight => RiseSetResult::Event {
            utc_hours: solar_midnight_utc(date, geo),
        },
    }
}

/// Solar transit as fractional UTC hours of `date`, in [0, 24).
pub fn solar_noon_utc(date: NaiveDate, geo: &GeoCoordinate) -> f64 {
    wrap_hours(solar_noon_midnight_minutes(
        julian_day(date),
        -geo.longitude(),
        SolarEvent::Noon,
    ))
}

/// Lower transit following `date`'s noon, as fractional UTC hours in [0, 24).
pub fn solar_midnight_utc(date: NaiveDate, geo: &GeoCoordinate) -> f64 {
    wrap_hours(solar_noon_midnight_minutes(
        julian_day(date),
        -geo.longitude(),
        SolarEvent::Midnight,
    ))
}

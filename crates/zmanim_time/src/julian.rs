//! Julian Date ↔ calendar conversions.
//!
//! The solar calculator works in Julian Dates and Julian centuries from
//! J2000.0. Calendar dates here are proleptic Gregorian; the Meeus
//! formulation is used so the result is a plain `f64` with no table lookup.
//!
//! Source: Meeus, *Astronomical Algorithms*, ch. 7. Public domain.

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Seconds in a civil day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days in a Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Date for a Gregorian calendar date with fractional day.
///
/// `day_frac = 1.5` means the 1st of the month at 12:00.
pub fn calendar_to_jd(year: i32, month: u32, day_frac: f64) -> f64 {
    let (mut y, mut m) = (year as f64, month as f64);
    if month <= 2 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day_frac + b - 1524.5
}

/// Gregorian calendar date for a Julian Date.
///
/// Returns `(year, month, day_frac)` where `day_frac` carries the time of
/// day as a fraction.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let jd5 = jd + 0.5;
    let z = jd5.floor();
    let f = jd5 - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day_frac = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day_frac)
}

/// Julian centuries since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Julian Date from Julian centuries since J2000.0.
pub fn centuries_to_jd(t: f64) -> f64 {
    t * DAYS_PER_CENTURY + J2000_JD
}

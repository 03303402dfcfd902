//! IANA time-zone helpers.
//!
//! All solar computations produce UTC instants; these helpers resolve the
//! local civil date and offsets needed to place those instants on a
//! location's wall clock.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::TimeError;

/// Parse an IANA zone identifier such as `Asia/Jerusalem`.
pub fn parse_time_zone(id: &str) -> Result<Tz, TimeError> {
    id.parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimeZone(id.to_string()))
}

fn local_noon(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + TimeDelta::hours(12)
}

/// UTC offset in seconds in effect at local noon of `date`.
pub fn utc_offset_seconds(tz: &Tz, date: NaiveDate) -> i32 {
    let noon = local_noon(date);
    match tz.offset_from_local_datetime(&noon).earliest() {
        Some(offset) => offset.fix().local_minus_utc(),
        None => tz.offset_from_utc_datetime(&noon).fix().local_minus_utc(),
    }
}

/// UTC offset in fractional hours in effect at local noon of `date`.
pub fn utc_offset_hours(tz: &Tz, date: NaiveDate) -> f64 {
    utc_offset_seconds(tz, date) as f64 / 3600.0
}

/// The UTC instant of the first moment of `date` on the local wall clock.
///
/// Zones that skip midnight for a DST change resolve to the first valid
/// instant after the gap.
pub fn local_midnight_utc(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => {
            let offset = utc_offset_seconds(tz, date);
            Utc.from_utc_datetime(&(midnight - TimeDelta::seconds(offset as i64)))
                + TimeDelta::hours(1)
        }
    }
}

/// Express a UTC instant on the zone's wall clock.
pub fn to_local(tz: &Tz, instant: DateTime<Utc>) -> DateTime<Tz> {
    instant.with_timezone(tz)
}

/// Local civil date of a UTC instant in `tz`.
pub fn local_date_of(tz: &Tz, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// UTC instant at `utc_hours` past 00:00 UTC of `date`.
///
/// Hours outside `[0, 24)` move into the neighbouring UTC day.
pub fn utc_from_hours(date: NaiveDate, utc_hours: f64) -> DateTime<Utc> {
    let millis = (utc_hours * 3_600_000.0).round() as i64;
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)) + TimeDelta::milliseconds(millis)
}

//! One-call helpers over the standard rule table.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use zmanim_astro::GeoCoordinate;
use zmanim_calendar::{DafYomi, HebrewDate, HebrewMonth, Molad, Parasha, daf_yomi, molad, upcoming_parasha};
use zmanim_engine::{ZmanConfig, ZmanResult, ZmanRuleEngine, ZmanSheet};
use zmanim_time::local_date_of;

use crate::cursor::CalendarDay;
use crate::error::ZmanimError;

/// Hebrew date of a civil date.
pub fn hebrew_date(date: NaiveDate) -> Result<HebrewDate, ZmanimError> {
    Ok(HebrewDate::from_gregorian(date)?)
}

/// Civil date of a Hebrew date.
pub fn gregorian_date(year: i32, month: HebrewMonth, day: u8) -> Result<NaiveDate, ZmanimError> {
    Ok(HebrewDate::new(year, month, day)?.to_gregorian()?)
}

/// Molad of a Hebrew month.
pub fn molad_of(year: i32, month: HebrewMonth) -> Result<Molad, ZmanimError> {
    Ok(molad(year, month)?)
}

/// Calendar facts for a civil date.
pub fn day_info(date: NaiveDate, in_israel: bool) -> Result<CalendarDay, ZmanimError> {
    CalendarDay::new(date, in_israel)
}

/// The next Shabbat's reading on or after `date`, with its Hebrew date.
pub fn next_parasha(date: NaiveDate, in_israel: bool) -> Result<(HebrewDate, Parasha), ZmanimError> {
    let hebrew = HebrewDate::from_gregorian(date)?;
    Ok(upcoming_parasha(&hebrew, in_israel)?)
}

/// Daf Yomi page for a civil date.
pub fn daf(date: NaiveDate) -> Result<DafYomi, ZmanimError> {
    Ok(daf_yomi(date)?)
}

/// The standard table evaluated for one date.
pub fn zmanim(
    date: NaiveDate,
    geo: &GeoCoordinate,
    config: &ZmanConfig,
) -> Result<ZmanSheet, ZmanimError> {
    let engine = ZmanRuleEngine::standard(config.clone())?;
    Ok(engine.evaluate(date, geo)?)
}

/// The next visible zman after `now`, looking into the following day when
/// today has none left.
pub fn next_zman(
    now: DateTime<Utc>,
    geo: &GeoCoordinate,
    config: &ZmanConfig,
) -> Result<Option<ZmanResult>, ZmanimError> {
    let engine = ZmanRuleEngine::standard(config.clone())?;
    let today = local_date_of(&geo.time_zone(), now);
    let mut date = Some(today);
    for _ in 0..2 {
        let Some(d) = date else { break };
        let sheet = engine.evaluate(d, geo)?;
        if let Some(r) = sheet.next_upcoming(now) {
            debug!(id = %r.id, date = %d, "next zman");
            return Ok(Some(r.clone()));
        }
        date = d.succ_opt();
    }
    Ok(None)
}

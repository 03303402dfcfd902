//! Compute-function evaluation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use zmanim_astro::SolarInstant;

use crate::config::MelakhaEnd;
use crate::context::{DayContext, RABBEINU_TAM_MINUTES, zenith_below_horizon};
use crate::definition::ComputeFn;
use crate::visible_sunrise::VisibleSunriseFlags;

/// Which sunrise a `sunrise` result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SunriseResult {
    SeaLevel { instant: DateTime<Utc> },
    Elevation { instant: DateTime<Utc> },
    Visible {
        instant: DateTime<Utc>,
        flags: VisibleSunriseFlags,
    },
}

impl SunriseResult {
    pub fn instant(&self) -> DateTime<Utc> {
        match *self {
            Self::SeaLevel { instant } | Self::Elevation { instant } | Self::Visible { instant, .. } => {
                instant
            }
        }
    }
}

/// The offset an instant was derived with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OffsetMeta {
    Degrees(f64),
    Minutes(f64),
}

impl From<MelakhaEnd> for OffsetMeta {
    fn from(end: MelakhaEnd) -> Self {
        match end {
            MelakhaEnd::Degrees(d) => Self::Degrees(d),
            MelakhaEnd::Minutes(m) => Self::Minutes(m),
        }
    }
}

/// Output of a compute function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Computed {
    /// The event does not occur on this date here.
    Unavailable,
    Instant(DateTime<Utc>),
    Sunrise(SunriseResult),
    WithOffset {
        instant: DateTime<Utc>,
        meta: OffsetMeta,
    },
}

impl Computed {
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Unavailable => None,
            Self::Instant(t) | Self::WithOffset { instant: t, .. } => Some(*t),
            Self::Sunrise(s) => Some(s.instant()),
        }
    }

    pub fn offset_meta(&self) -> Option<OffsetMeta> {
        match self {
            Self::WithOffset { meta, .. } => Some(*meta),
            _ => None,
        }
    }

    fn with_offset(instant: SolarInstant, meta: OffsetMeta) -> Self {
        match instant {
            SolarInstant::At(instant) => Self::WithOffset { instant, meta },
            SolarInstant::Unavailable => Self::Unavailable,
        }
    }
}

impl From<SolarInstant> for Computed {
    fn from(s: SolarInstant) -> Self {
        match s {
            SolarInstant::At(t) => Self::Instant(t),
            SolarInstant::Unavailable => Self::Unavailable,
        }
    }
}

fn sunrise(ctx: &DayContext<'_>) -> Computed {
    if let Some((instant, flags)) = ctx.visible_sunrise {
        return Computed::Sunrise(SunriseResult::Visible { instant, flags });
    }
    match (ctx.sunrise(), ctx.config.use_elevation) {
        (SolarInstant::Unavailable, _) => Computed::Unavailable,
        (SolarInstant::At(instant), true) => Computed::Sunrise(SunriseResult::Elevation { instant }),
        (SolarInstant::At(instant), false) => Computed::Sunrise(SunriseResult::SeaLevel { instant }),
    }
}

/// End of Shabbat and Yom Tov under the configured rule.
pub fn tzet_melakha(ctx: &DayContext<'_>) -> Computed {
    let instant = match ctx.melakha_end {
        MelakhaEnd::Degrees(d) => ctx.astro.sunset_offset_by_degrees(zenith_below_horizon(d)),
        MelakhaEnd::Minutes(m) => ctx.sunset().offset_minutes(m),
    };
    Computed::with_offset(instant, ctx.melakha_end.into())
}

/// Stringent nightfall under the configured depression.
pub fn stringent_tzet(ctx: &DayContext<'_>) -> Computed {
    let d = ctx.config.stringent_tzet_degrees;
    Computed::with_offset(
        ctx.astro.sunset_offset_by_degrees(zenith_below_horizon(d)),
        OffsetMeta::Degrees(d),
    )
}

/// Configured minutes before sunset.
pub fn candle_lighting(ctx: &DayContext<'_>) -> Computed {
    let m = ctx.config.candle_lighting_offset_minutes;
    Computed::with_offset(ctx.sunset().offset_minutes(-m), OffsetMeta::Minutes(m))
}

/// Evaluate `f` for the context's date.
pub fn compute(f: &ComputeFn, ctx: &DayContext<'_>) -> Computed {
    match *f {
        ComputeFn::Sunrise => sunrise(ctx),
        ComputeFn::Sunset => ctx.sunset().into(),
        ComputeFn::SolarNoon => ctx.astro.solar_noon().into(),
        ComputeFn::SolarMidnight => ctx.astro.solar_midnight().into(),
        ComputeFn::SunriseOffsetDegrees { degrees } => Computed::with_offset(
            ctx.astro.sunrise_offset_by_degrees(zenith_below_horizon(degrees)),
            OffsetMeta::Degrees(degrees),
        ),
        ComputeFn::SunsetOffsetDegrees { degrees } => Computed::with_offset(
            ctx.astro.sunset_offset_by_degrees(zenith_below_horizon(degrees)),
            OffsetMeta::Degrees(degrees),
        ),
        ComputeFn::SunriseOffsetMinutes { minutes } => Computed::with_offset(
            ctx.offset_minutes(ctx.sunrise(), minutes),
            OffsetMeta::Minutes(minutes),
        ),
        ComputeFn::SunsetOffsetMinutes { minutes } => Computed::with_offset(
            ctx.offset_minutes(ctx.sunset(), minutes),
            OffsetMeta::Minutes(minutes),
        ),
        ComputeFn::SeasonalHours { basis, hours } => ctx
            .model(basis)
            .map_or(Computed::Unavailable, |m| Computed::Instant(m.hours_into_day(hours))),
        ComputeFn::CandleLighting => candle_lighting(ctx),
        ComputeFn::TzetMelakha => tzet_melakha(ctx),
        ComputeFn::StringentTzet => stringent_tzet(ctx),
        ComputeFn::RabbeinuTam => Computed::with_offset(
            ctx.sunset().offset_minutes(RABBEINU_TAM_MINUTES),
            OffsetMeta::Minutes(RABBEINU_TAM_MINUTES),
        ),
        ComputeFn::NextDayAlot { degrees } => {
            let instant = ctx.astro.next_day().map_or(SolarInstant::Unavailable, |next| {
                next.sunrise_offset_by_degrees(zenith_below_horizon(degrees))
            });
            Computed::with_offset(instant, OffsetMeta::Degrees(degrees))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MelakhaEndOffset, ZmanConfig};
    use crate::definition::SeasonalBasis;
    use crate::temporal_hour::HourMode;
    use chrono::{NaiveDate, TimeDelta};
    use zmanim_astro::GeoCoordinate;

    fn new_york() -> GeoCoordinate {
        GeoCoordinate::new("New York", 40.7128, -74.006, 10.0, "America/New_York").unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn sunrise_variant_follows_elevation_setting() {
        let geo = new_york();
        let sea = ZmanConfig::default();
        let ctx = DayContext::new(date(), &geo, &sea, None).unwrap();
        assert!(matches!(
            compute(&ComputeFn::Sunrise, &ctx),
            Computed::Sunrise(SunriseResult::SeaLevel { .. })
        ));
        let elev = ZmanConfig {
            use_elevation: true,
            ..ZmanConfig::default()
        };
        let ctx = DayContext::new(date(), &geo, &elev, None).unwrap();
        assert!(matches!(
            compute(&ComputeFn::Sunrise, &ctx),
            Computed::Sunrise(SunriseResult::Elevation { .. })
        ));
    }

    #[test]
    fn candle_lighting_is_offset_before_sunset() {
        let geo = new_york();
        let config = ZmanConfig::default();
        let ctx = DayContext::new(date(), &geo, &config, None).unwrap();
        let sunset = compute(&ComputeFn::Sunset, &ctx).instant().unwrap();
        let candles = compute(&ComputeFn::CandleLighting, &ctx);
        assert_eq!(candles.instant().unwrap(), sunset - TimeDelta::minutes(18));
        assert_eq!(candles.offset_meta(), Some(OffsetMeta::Minutes(18.0)));
    }

    #[test]
    fn tzet_melakha_in_minutes() {
        let geo = new_york();
        let config = ZmanConfig {
            melakha_end_offset: MelakhaEndOffset::minutes(50.0),
            ..ZmanConfig::default()
        };
        let ctx = DayContext::new(date(), &geo, &config, None).unwrap();
        let sunset = compute(&ComputeFn::Sunset, &ctx).instant().unwrap();
        let tzet = compute(&ComputeFn::TzetMelakha, &ctx);
        assert_eq!(tzet.instant().unwrap(), sunset + TimeDelta::minutes(50));
        assert_eq!(tzet.offset_meta(), Some(OffsetMeta::Minutes(50.0)));
    }

    #[test]
    fn fixed_and_seasonal_minute_offsets() {
        let geo = new_york();
        let fixed = ZmanConfig {
            hour_mode: HourMode::Fixed,
            ..ZmanConfig::default()
        };
        let ctx = DayContext::new(date(), &geo, &fixed, None).unwrap();
        let sunrise = compute(&ComputeFn::Sunrise, &ctx).instant().unwrap();
        let alot = compute(&ComputeFn::SunriseOffsetMinutes { minutes: -72.0 }, &ctx);
        assert_eq!(alot.instant().unwrap(), sunrise - TimeDelta::minutes(72));

        let seasonal = ZmanConfig::default();
        let ctx = DayContext::new(date(), &geo, &seasonal, None).unwrap();
        let alot = compute(&ComputeFn::SunriseOffsetMinutes { minutes: -72.0 }, &ctx)
            .instant()
            .unwrap();
        let hour = ctx.model(SeasonalBasis::Gra).unwrap().seasonal_hour();
        let diff = (sunrise - alot - hour * 6 / 5).num_milliseconds().abs();
        assert!(diff <= 5, "seasonal 72 minutes is 1.2 seasonal hours");
    }

    #[test]
    fn ordering_across_the_day() {
        let geo = new_york();
        let config = ZmanConfig::default();
        let ctx = DayContext::new(date(), &geo, &config, None).unwrap();
        let at = |f: ComputeFn| compute(&f, &ctx).instant().unwrap();
        let alot = at(ComputeFn::SunriseOffsetDegrees { degrees: 16.1 });
        let sunrise = at(ComputeFn::Sunrise);
        let shma = at(ComputeFn::SeasonalHours {
            basis: SeasonalBasis::Gra,
            hours: 3.0,
        });
        let noon = at(ComputeFn::SolarNoon);
        let sunset = at(ComputeFn::Sunset);
        let stringent = at(ComputeFn::StringentTzet);
        let tzet = at(ComputeFn::TzetMelakha);
        let rt = at(ComputeFn::RabbeinuTam);
        let next_alot = at(ComputeFn::NextDayAlot { degrees: 16.1 });
        assert!(alot < sunrise && sunrise < shma && shma < noon && noon < sunset);
        assert!(sunset < stringent && stringent < tzet && tzet < rt && rt < next_alot);
    }
}

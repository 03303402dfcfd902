//! Per-day evaluation context.
//!
//! Everything a compute function or condition needs about one civil date at
//! one location is resolved once here, then shared by every definition in
//! the table.

use chrono::{DateTime, NaiveDate, Utc};

use zmanim_astro::{AstronomicalDay, GeoCoordinate, SolarInstant};
use zmanim_calendar::{DayTags, HebrewDate, day_tags};

use crate::config::{MelakhaEnd, ZmanConfig};
use crate::definition::SeasonalBasis;
use crate::error::EngineError;
use crate::temporal_hour::{HourMode, TemporalHourModel};
use crate::visible_sunrise::{VisibleSunriseFlags, VisibleSunriseTable};

/// Magen Avraham clock-minute margin around sunrise and sunset.
pub const MGA_MINUTES: f64 = 72.0;
/// Magen Avraham dawn and nightfall depression.
pub const MGA_DEGREES: f64 = 16.1;
/// Rabbeinu Tam nightfall, clock minutes after sunset.
pub const RABBEINU_TAM_MINUTES: f64 = 72.0;

/// Zenith angle for a depression of `degrees` below the horizon.
pub fn zenith_below_horizon(degrees: f64) -> f64 {
    90.0 + degrees
}

/// Resolved inputs for evaluating one date.
#[derive(Debug, Clone)]
pub struct DayContext<'a> {
    pub date: NaiveDate,
    pub hebrew: HebrewDate,
    pub tags: DayTags,
    /// Tags of the following civil day; empty at the end of the calendar.
    pub tomorrow_tags: DayTags,
    pub astro: AstronomicalDay,
    pub config: &'a ZmanConfig,
    pub melakha_end: MelakhaEnd,
    pub visible_sunrise: Option<(DateTime<Utc>, VisibleSunriseFlags)>,
    gra: Option<TemporalHourModel>,
    mga: Option<TemporalHourModel>,
    mga_degrees: Option<TemporalHourModel>,
}

impl<'a> DayContext<'a> {
    pub fn new(
        date: NaiveDate,
        geo: &GeoCoordinate,
        config: &'a ZmanConfig,
        visible: Option<&VisibleSunriseTable>,
    ) -> Result<Self, EngineError> {
        let melakha_end = config.melakha_end()?;
        let hebrew = HebrewDate::from_gregorian(date)?;
        let tags = day_tags(&hebrew, config.in_israel);
        let tomorrow_tags = hebrew
            .next_day()
            .map(|h| day_tags(&h, config.in_israel))
            .unwrap_or_default();
        let astro = AstronomicalDay::new(date, geo.clone());
        let visible_sunrise = visible.and_then(|t| t.resolve(date, &geo.time_zone()));

        let sunrise = astro.sunrise_for(config.use_elevation);
        let sunset = astro.sunset_for(config.use_elevation);
        let gra = TemporalHourModel::new(sunrise, sunset, config.hour_mode);
        let mga = TemporalHourModel::new(
            sunrise.offset_minutes(-MGA_MINUTES),
            sunset.offset_minutes(MGA_MINUTES),
            config.hour_mode,
        );
        let zenith = zenith_below_horizon(MGA_DEGREES);
        let mga_degrees = TemporalHourModel::new(
            astro.sunrise_offset_by_degrees(zenith),
            astro.sunset_offset_by_degrees(zenith),
            config.hour_mode,
        );

        Ok(Self {
            date,
            hebrew,
            tags,
            tomorrow_tags,
            astro,
            config,
            melakha_end,
            visible_sunrise,
            gra,
            mga,
            mga_degrees,
        })
    }

    /// Seasonal-hour model for `basis`; `None` when a boundary is missing.
    pub fn model(&self, basis: SeasonalBasis) -> Option<&TemporalHourModel> {
        match basis {
            SeasonalBasis::Gra => self.gra.as_ref(),
            SeasonalBasis::Mga => self.mga.as_ref(),
            SeasonalBasis::MgaDegrees => self.mga_degrees.as_ref(),
        }
    }

    pub fn sunrise(&self) -> SolarInstant {
        self.astro.sunrise_for(self.config.use_elevation)
    }

    pub fn sunset(&self) -> SolarInstant {
        self.astro.sunset_for(self.config.use_elevation)
    }

    /// `from` shifted by `minutes` in the configured hour mode. Seasonal
    /// minutes are measured on the sunrise-to-sunset day.
    pub fn offset_minutes(&self, from: SolarInstant, minutes: f64) -> SolarInstant {
        let Some(from) = from.instant() else {
            return SolarInstant::Unavailable;
        };
        match self.config.hour_mode {
            HourMode::Fixed => TemporalHourModel::add_fixed_minutes(from, minutes).into(),
            HourMode::Seasonal => match &self.gra {
                Some(model) => model.add_seasonal_minutes(from, minutes).into(),
                None => SolarInstant::Unavailable,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zmanim_calendar::DayTag;

    fn jerusalem() -> GeoCoordinate {
        GeoCoordinate::new("Jerusalem", 31.778, 35.2354, 754.0, "Asia/Jerusalem").unwrap()
    }

    #[test]
    fn tags_for_today_and_tomorrow() {
        let config = ZmanConfig::default();
        let date = NaiveDate::from_ymd_opt(2024, 4, 22).unwrap();
        let ctx = DayContext::new(date, &jerusalem(), &config, None).unwrap();
        assert!(ctx.tags.contains(DayTag::ErevPesach));
        assert!(ctx.tomorrow_tags.contains(DayTag::YomTov));
        assert_eq!(ctx.hebrew.day(), 14);
    }

    #[test]
    fn models_are_ordered() {
        let config = ZmanConfig::default();
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let ctx = DayContext::new(date, &jerusalem(), &config, None).unwrap();
        let gra = ctx.model(SeasonalBasis::Gra).unwrap();
        let mga = ctx.model(SeasonalBasis::Mga).unwrap();
        let deg = ctx.model(SeasonalBasis::MgaDegrees).unwrap();
        assert!(mga.start() < gra.start());
        assert!(mga.end() > gra.end());
        assert!(deg.start() < gra.start());
    }

    #[test]
    fn polar_day_has_no_gra_model() {
        let config = ZmanConfig::default();
        let geo = GeoCoordinate::new("Tromso", 69.6496, 18.956, 0.0, "Europe/Oslo").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let ctx = DayContext::new(date, &geo, &config, None).unwrap();
        assert!(ctx.model(SeasonalBasis::Gra).is_none());
        assert!(!ctx.offset_minutes(ctx.sunset(), 18.0).is_available());
    }
}

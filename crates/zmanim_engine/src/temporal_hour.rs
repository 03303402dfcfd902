//! Seasonal (zmaniyot) hours and minutes.
//!
//! A day span from `start` to `end` divides into 12 seasonal hours or 720
//! seasonal minutes. Communities that reckon offsets in clock minutes use
//! [`HourMode::Fixed`]; [`TemporalHourModel::add_minutes`] dispatches on the
//! mode so rules can be written once.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use zmanim_astro::SolarInstant;

/// Seasonal hours in a day span.
pub const HOURS_PER_DAY: f64 = 12.0;
/// Seasonal minutes in a day span.
pub const MINUTES_PER_DAY: f64 = 720.0;

/// How minute offsets are reckoned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HourMode {
    /// Minutes scale with the length of the day.
    #[default]
    Seasonal,
    /// Clock minutes.
    Fixed,
}

impl HourMode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Seasonal => "seasonal",
            Self::Fixed => "fixed",
        }
    }
}

/// Seasonal-hour arithmetic over one day span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalHourModel {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    mode: HourMode,
}

fn scaled(span: TimeDelta, fraction: f64) -> TimeDelta {
    let ms = span.num_milliseconds() as f64 * fraction;
    TimeDelta::milliseconds(ms.round() as i64)
}

impl TemporalHourModel {
    /// Model over `start..end`; `None` if either boundary is unavailable or
    /// the span is not positive.
    pub fn new(start: SolarInstant, end: SolarInstant, mode: HourMode) -> Option<Self> {
        let (start, end) = (start.instant()?, end.instant()?);
        (end > start).then_some(Self { start, end, mode })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn mode(&self) -> HourMode {
        self.mode
    }

    pub fn span(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Length of one seasonal hour.
    pub fn seasonal_hour(&self) -> TimeDelta {
        scaled(self.span(), 1.0 / HOURS_PER_DAY)
    }

    /// Length of one seasonal minute.
    pub fn seasonal_minute(&self) -> TimeDelta {
        scaled(self.span(), 1.0 / MINUTES_PER_DAY)
    }

    /// `from` shifted by `hours` seasonal hours (may be negative or
    /// fractional).
    pub fn add_seasonal_hours(&self, from: DateTime<Utc>, hours: f64) -> DateTime<Utc> {
        from + scaled(self.span(), hours / HOURS_PER_DAY)
    }

    /// `from` shifted by `minutes` seasonal minutes.
    pub fn add_seasonal_minutes(&self, from: DateTime<Utc>, minutes: f64) -> DateTime<Utc> {
        from + scaled(self.span(), minutes / MINUTES_PER_DAY)
    }

    /// `from` shifted by `minutes` clock minutes.
    pub fn add_fixed_minutes(from: DateTime<Utc>, minutes: f64) -> DateTime<Utc> {
        from + TimeDelta::milliseconds((minutes * 60_000.0).round() as i64)
    }

    /// Seasonal or clock minutes depending on the model's mode.
    pub fn add_minutes(&self, from: DateTime<Utc>, minutes: f64) -> DateTime<Utc> {
        match self.mode {
            HourMode::Seasonal => self.add_seasonal_minutes(from, minutes),
            HourMode::Fixed => Self::add_fixed_minutes(from, minutes),
        }
    }

    /// Time `hours` seasonal hours after the start of the span.
    pub fn hours_into_day(&self, hours: f64) -> DateTime<Utc> {
        self.add_seasonal_hours(self.start, hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 21, h, m, 0).unwrap()
    }

    fn model(mode: HourMode) -> TemporalHourModel {
        // 14.4-hour day: seasonal hour = 72 minutes
        TemporalHourModel::new(SolarInstant::At(at(4, 0)), SolarInstant::At(at(18, 24)), mode)
            .unwrap()
    }

    #[test]
    fn seasonal_units() {
        let m = model(HourMode::Seasonal);
        assert_eq!(m.seasonal_hour(), TimeDelta::minutes(72));
        assert_eq!(m.seasonal_minute(), TimeDelta::milliseconds(72_000));
    }

    #[test]
    fn hours_into_day() {
        let m = model(HourMode::Seasonal);
        assert_eq!(m.hours_into_day(3.0), at(7, 36));
        assert_eq!(m.hours_into_day(6.0), at(11, 12));
        assert_eq!(m.hours_into_day(12.0), m.end());
    }

    #[test]
    fn add_minutes_dispatches_on_mode() {
        let seasonal = model(HourMode::Seasonal);
        let fixed = model(HourMode::Fixed);
        assert_eq!(seasonal.add_minutes(at(18, 24), 50.0), at(19, 24));
        assert_eq!(fixed.add_minutes(at(18, 24), 50.0), at(19, 14));
        assert_eq!(fixed.add_minutes(at(4, 0), -72.0), at(2, 48));
    }

    #[test]
    fn unavailable_boundary_gives_no_model() {
        assert!(
            TemporalHourModel::new(SolarInstant::Unavailable, SolarInstant::At(at(18, 0)), HourMode::Seasonal)
                .is_none()
        );
        assert!(
            TemporalHourModel::new(SolarInstant::At(at(18, 0)), SolarInstant::At(at(4, 0)), HourMode::Fixed)
                .is_none()
        );
    }

    #[test]
    fn serde_lowercase() {
        let m: HourMode = serde_json::from_str("\"fixed\"").unwrap();
        assert_eq!(m, HourMode::Fixed);
        assert_eq!(HourMode::default().name(), "seasonal");
    }
}

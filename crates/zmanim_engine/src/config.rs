//! Community-custom configuration for zman evaluation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::EngineError;
use crate::temporal_hour::HourMode;

/// Default minutes before sunset for candle lighting.
pub const DEFAULT_CANDLE_LIGHTING_MINUTES: f64 = 18.0;
/// Default depression angle for the end of Shabbat and Yom Tov.
pub const DEFAULT_MELAKHA_END_DEGREES: f64 = 8.5;
/// Default depression angle for stringent nightfall (fast days).
pub const DEFAULT_STRINGENT_TZET_DEGREES: f64 = 7.083;

/// Offset after sunset at which Shabbat or Yom Tov ends, as written in
/// configuration: exactly one of the two fields must be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MelakhaEndOffset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degrees: Option<f64>,
}

/// Resolved end-of-Shabbat rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MelakhaEnd {
    /// Sun this many degrees below the horizon.
    Degrees(f64),
    /// Clock minutes after sunset.
    Minutes(f64),
}

impl MelakhaEndOffset {
    pub const fn degrees(degrees: f64) -> Self {
        Self {
            minutes: None,
            degrees: Some(degrees),
        }
    }

    pub const fn minutes(minutes: f64) -> Self {
        Self {
            minutes: Some(minutes),
            degrees: None,
        }
    }

    pub fn resolve(&self) -> Result<MelakhaEnd, EngineError> {
        match (self.minutes, self.degrees) {
            (Some(m), None) => Ok(MelakhaEnd::Minutes(m)),
            (None, Some(d)) => Ok(MelakhaEnd::Degrees(d)),
            (None, None) => Err(EngineError::Config(
                "melakha_end_offset needs `minutes` or `degrees`".into(),
            )),
            (Some(_), Some(_)) => Err(EngineError::Config(
                "melakha_end_offset takes only one of `minutes` and `degrees`".into(),
            )),
        }
    }
}

/// Evaluation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZmanConfig {
    /// Use elevation-adjusted sunrise and sunset.
    pub use_elevation: bool,
    pub hour_mode: HourMode,
    pub candle_lighting_offset_minutes: f64,
    pub melakha_end_offset: MelakhaEndOffset,
    pub stringent_tzet_degrees: f64,
    /// One-day Yom Tov and the Israeli luach.
    pub in_israel: bool,
}

impl Default for ZmanConfig {
    fn default() -> Self {
        Self {
            use_elevation: false,
            hour_mode: HourMode::Seasonal,
            candle_lighting_offset_minutes: DEFAULT_CANDLE_LIGHTING_MINUTES,
            melakha_end_offset: MelakhaEndOffset::degrees(DEFAULT_MELAKHA_END_DEGREES),
            stringent_tzet_degrees: DEFAULT_STRINGENT_TZET_DEGREES,
            in_israel: false,
        }
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        warn!(field = name, value, "rejected configuration value");
        Err(EngineError::Config(format!(
            "{name} must be a finite non-negative number, got {value}"
        )))
    }
}

impl ZmanConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject negative offsets and an incomplete melakha offset.
    pub fn validate(&self) -> Result<(), EngineError> {
        non_negative(
            "candle_lighting_offset_minutes",
            self.candle_lighting_offset_minutes,
        )?;
        non_negative("stringent_tzet_degrees", self.stringent_tzet_degrees)?;
        match self.melakha_end_offset.resolve() {
            Ok(MelakhaEnd::Minutes(m)) => non_negative("melakha_end_offset.minutes", m),
            Ok(MelakhaEnd::Degrees(d)) => non_negative("melakha_end_offset.degrees", d),
            Err(e) => {
                warn!(error = %e, "rejected melakha_end_offset");
                Err(e)
            }
        }
    }

    /// Resolved end-of-Shabbat rule. Only fails for a configuration that
    /// did not pass [`validate`](Self::validate).
    pub fn melakha_end(&self) -> Result<MelakhaEnd, EngineError> {
        self.melakha_end_offset.resolve()
    }
}

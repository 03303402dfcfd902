//! Declarative zman definitions.
//!
//! A definition names a compute function plus the applicability rules the
//! engine checks around it. Definitions are plain serde data so rule tables
//! can be loaded from JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use zmanim_calendar::DayTag;

use crate::temporal_hour::HourMode;

/// Locale code to display text.
pub type Labels = BTreeMap<String, String>;

/// Day span over which seasonal hours are reckoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeasonalBasis {
    /// Vilna Gaon: sunrise to sunset.
    Gra,
    /// Magen Avraham: 72 clock minutes before sunrise to 72 after sunset.
    Mga,
    /// Magen Avraham with dawn and nightfall at 16.1° below the horizon.
    MgaDegrees,
}

/// How a definition's instant is computed.
///
/// Minute offsets are signed (negative is earlier). Degree offsets are the
/// depression of the sun below the horizon, before sunrise or after sunset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fn", rename_all = "camelCase", deny_unknown_fields)]
pub enum ComputeFn {
    Sunrise,
    Sunset,
    SolarNoon,
    SolarMidnight,
    SunriseOffsetDegrees { degrees: f64 },
    SunsetOffsetDegrees { degrees: f64 },
    /// Seasonal or clock minutes depending on the hour mode.
    SunriseOffsetMinutes { minutes: f64 },
    SunsetOffsetMinutes { minutes: f64 },
    SeasonalHours { basis: SeasonalBasis, hours: f64 },
    /// Configured minutes before sunset.
    CandleLighting,
    /// Configured end of Shabbat and Yom Tov.
    TzetMelakha,
    /// Configured stringent nightfall.
    StringentTzet,
    /// 72 clock minutes after sunset.
    RabbeinuTam,
    /// Dawn of the following morning at `degrees` below the horizon.
    NextDayAlot { degrees: f64 },
}

impl ComputeFn {
    /// Serialized names of every compute function.
    pub const NAMES: [&'static str; 14] = [
        "sunrise",
        "sunset",
        "solarNoon",
        "solarMidnight",
        "sunriseOffsetDegrees",
        "sunsetOffsetDegrees",
        "sunriseOffsetMinutes",
        "sunsetOffsetMinutes",
        "seasonalHours",
        "candleLighting",
        "tzetMelakha",
        "stringentTzet",
        "rabbeinuTam",
        "nextDayAlot",
    ];

    pub fn is_known(name: &str) -> bool {
        Self::NAMES.contains(&name)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sunrise => Self::NAMES[0],
            Self::Sunset => Self::NAMES[1],
            Self::SolarNoon => Self::NAMES[2],
            Self::SolarMidnight => Self::NAMES[3],
            Self::SunriseOffsetDegrees { .. } => Self::NAMES[4],
            Self::SunsetOffsetDegrees { .. } => Self::NAMES[5],
            Self::SunriseOffsetMinutes { .. } => Self::NAMES[6],
            Self::SunsetOffsetMinutes { .. } => Self::NAMES[7],
            Self::SeasonalHours { .. } => Self::NAMES[8],
            Self::CandleLighting => Self::NAMES[9],
            Self::TzetMelakha => Self::NAMES[10],
            Self::StringentTzet => Self::NAMES[11],
            Self::RabbeinuTam => Self::NAMES[12],
            Self::NextDayAlot { .. } => Self::NAMES[13],
        }
    }
}

/// Calculation scheme a definition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LuachRestriction {
    /// Only with seasonal hours.
    Seasonal,
    /// Only with clock-minute offsets.
    Fixed,
    /// Degree-based diaspora luach: seasonal hours, outside Israel.
    Degrees,
}

impl LuachRestriction {
    /// Whether the restriction is satisfied by the active settings.
    pub fn allows(self, mode: HourMode, in_israel: bool) -> bool {
        match self {
            Self::Seasonal => mode == HourMode::Seasonal,
            Self::Fixed => mode == HourMode::Fixed,
            Self::Degrees => mode == HourMode::Seasonal && !in_israel,
        }
    }
}

/// Named applicability predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    /// A public fast other than Yom Kippur.
    IsTaanitNotYomKippur,
    /// A fast that begins at dawn: neither Yom Kippur nor Tisha B'Av.
    IsDawnFast,
    /// Tisha B'Av begins at tonight's sunset.
    ErevTishaBAv,
    /// Selichot season (Elul to 9 Tishrei) or the eve of bedikat chametz.
    LateNight,
    /// Nights of all-night learning: Shavuot and Hoshana Rabba.
    AllNight,
    /// Today is Shabbat or Yom Tov.
    TzetMelakha,
    /// Tomorrow is Shabbat or Yom Tov.
    CandleLighting,
    ErevPesach,
}

/// Minute rounding policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    /// Round up only past 40 seconds.
    #[default]
    Earlier,
    /// Round up past 20 seconds.
    Later,
    /// Keep seconds.
    Exact,
}

/// One row of a rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ZmanDefinition {
    pub id: String,
    pub compute: ComputeFn,
    /// Day tags at least one of which must hold today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub festival: Option<Vec<DayTag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub luach: Option<LuachRestriction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub rounding: Rounding,
    pub labels: Labels,
    /// Shorter labels used when this time is merged with another.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_labels: Option<Labels>,
    /// Exclude from "next upcoming" scheduling.
    #[serde(default)]
    pub ignore_next_upcoming: bool,
}

impl ZmanDefinition {
    /// Minimal definition with English and Hebrew labels.
    pub fn new(id: impl Into<String>, compute: ComputeFn, en: &str, he: &str) -> Self {
        let mut labels = Labels::new();
        labels.insert("en".into(), en.into());
        labels.insert("he".into(), he.into());
        Self {
            id: id.into(),
            compute,
            festival: None,
            luach: None,
            condition: None,
            rounding: Rounding::default(),
            labels,
            merge_labels: None,
            ignore_next_upcoming: false,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_luach(mut self, luach: LuachRestriction) -> Self {
        self.luach = Some(luach);
        self
    }

    pub fn with_festival(mut self, tags: Vec<DayTag>) -> Self {
        self.festival = Some(tags);
        self
    }

    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }
}

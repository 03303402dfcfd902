//! Evaluated results for one day.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Serialize, Serializer};

use zmanim_calendar::{DayTags, HebrewDate};

use crate::definition::Labels;

/// Whether and why a result is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "i8")]
#[repr(i8)]
pub enum DisplayState {
    /// The event has no instant on this date.
    Invalid = -2,
    /// The definition does not belong to the active luach.
    WrongConfig = -1,
    /// Computed but not applicable today.
    Suppressed = 0,
    Visible = 1,
}

impl DisplayState {
    pub const fn code(self) -> i8 {
        self as i8
    }

    pub const fn from_code(code: i8) -> Option<Self> {
        match code {
            -2 => Some(Self::Invalid),
            -1 => Some(Self::WrongConfig),
            0 => Some(Self::Suppressed),
            1 => Some(Self::Visible),
            _ => None,
        }
    }
}

impl From<DisplayState> for i8 {
    fn from(s: DisplayState) -> Self {
        s.code()
    }
}

impl TryFrom<i8> for DisplayState {
    type Error = i8;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(code)
    }
}

/// Why a result is not plainly visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// Festival-only definition on a day without its festival.
    NonProperYomTov,
    WrongLuach,
    /// A named condition failed; carries its code.
    Condition(&'static str),
    InvalidDate,
    /// The table row could not be read.
    MalformedDefinition,
}

impl Diagnostic {
    pub const fn message(self) -> &'static str {
        match self {
            Self::NonProperYomTov => "non-proper Yom Tov day",
            Self::WrongLuach => "wrong luach",
            Self::Condition(code) => code,
            Self::InvalidDate => "Invalid Date",
            Self::MalformedDefinition => "malformed definition",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.message())
    }
}

/// One evaluated definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZmanResult {
    pub id: String,
    /// Rounded instant; present for suppressed results too.
    pub instant: Option<DateTime<Utc>>,
    pub display: DisplayState,
    pub labels: Labels,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_labels: Option<Labels>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ignore_next_upcoming: bool,
}

impl ZmanResult {
    /// Label for `locale`, falling back to English.
    pub fn label(&self, locale: &str) -> Option<&str> {
        self.labels
            .get(locale)
            .or_else(|| self.labels.get("en"))
            .map(String::as_str)
    }

    pub fn is_visible(&self) -> bool {
        self.display == DisplayState::Visible
    }
}

/// All results for one date, in rule-table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZmanSheet {
    pub date: NaiveDate,
    pub hebrew_date: HebrewDate,
    #[serde(skip)]
    pub tags: DayTags,
    pub results: Vec<ZmanResult>,
}

impl ZmanSheet {
    pub fn get(&self, id: &str) -> Option<&ZmanResult> {
        self.results.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZmanResult> {
        self.results.iter()
    }

    pub fn visible(&self) -> impl Iterator<Item = &ZmanResult> {
        self.results.iter().filter(|r| r.is_visible())
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Earliest visible result strictly after `now`.
    pub fn next_upcoming(&self, now: DateTime<Utc>) -> Option<&ZmanResult> {
        self.visible()
            .filter(|r| !r.ignore_next_upcoming)
            .filter_map(|r| r.instant.filter(|t| *t > now).map(|t| (t, r)))
            .min_by_key(|(t, _)| *t)
            .map(|(_, r)| r)
    }

    /// Time until the next upcoming result, when a display should refresh.
    pub fn recompute_delay(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.next_upcoming(now)
            .and_then(|r| r.instant)
            .map(|t| t - now)
    }
}

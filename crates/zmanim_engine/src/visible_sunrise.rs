//! Caller-supplied visible-sunrise overrides.
//!
//! Visible sunrise accounts for terrain and cannot be derived from the NOAA
//! model; published tables give a local clock time per date. The engine
//! prefers an entry from this table over the calculated sunrise.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use zmanim_time::Tz;

use crate::error::EngineError;

/// One published visible-sunrise time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleSunriseEntry {
    /// Local wall-clock time.
    pub time: NaiveTime,
    /// The source marks this time as estimated.
    #[serde(default)]
    pub approximate: bool,
}

/// Metadata carried with a visible sunrise result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VisibleSunriseFlags {
    pub approximate: bool,
}

/// Visible-sunrise times keyed by local date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibleSunriseTable {
    entries: BTreeMap<NaiveDate, VisibleSunriseEntry>,
}

impl VisibleSunriseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{"2024-04-23": {"time": "06:03:20"}, ...}`.
    pub fn from_json_str(s: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn insert(&mut self, date: NaiveDate, entry: VisibleSunriseEntry) {
        self.entries.insert(date, entry);
    }

    pub fn get(&self, date: NaiveDate) -> Option<&VisibleSunriseEntry> {
        self.entries.get(&date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// UTC instant of the entry for `date` in zone `tz`. Wall times that
    /// fall in a DST gap have no instant and are skipped.
    pub fn resolve(&self, date: NaiveDate, tz: &Tz) -> Option<(DateTime<Utc>, VisibleSunriseFlags)> {
        let entry = self.get(date)?;
        let local = tz.from_local_datetime(&date.and_time(entry.time)).earliest()?;
        Some((
            local.with_timezone(&Utc),
            VisibleSunriseFlags {
                approximate: entry.approximate,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parse_and_resolve() {
        let t = VisibleSunriseTable::from_json_str(
            r#"{ "2024-04-23": { "time": "06:03:20" },
                 "2024-04-24": { "time": "06:02:10", "approximate": true } }"#,
        )
        .unwrap();
        assert_eq!(t.len(), 2);
        let tz: Tz = "Asia/Jerusalem".parse().unwrap();
        let (utc, flags) = t
            .resolve(NaiveDate::from_ymd_opt(2024, 4, 23).unwrap(), &tz)
            .unwrap();
        assert_eq!((utc.hour(), utc.minute(), utc.second()), (3, 3, 20));
        assert!(!flags.approximate);
        let (_, flags) = t
            .resolve(NaiveDate::from_ymd_opt(2024, 4, 24).unwrap(), &tz)
            .unwrap();
        assert!(flags.approximate);
        assert!(t.resolve(NaiveDate::from_ymd_opt(2024, 4, 25).unwrap(), &tz).is_none());
    }
}

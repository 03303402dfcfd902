//! The zman rule engine.
//!
//! For each definition, in table order:
//! 1. festival filter (suppress on days without a listed tag)
//! 2. luach filter (wrong configuration, never overridden)
//! 3. compute the instant
//! 4. per-id special case
//! 5. named condition (suppress, instant kept)
//! 6. missing instant is invalid unless already a configuration mismatch
//! 7. minute rounding

use chrono::NaiveDate;
use tracing::{debug, trace};

use zmanim_astro::GeoCoordinate;

use crate::compute::compute;
use crate::config::ZmanConfig;
use crate::context::DayContext;
use crate::definition::{Labels, ZmanDefinition};
use crate::error::EngineError;
use crate::rounding::round_instant;
use crate::sheet::{Diagnostic, DisplayState, ZmanResult, ZmanSheet};
use crate::special_cases::{Pending, special_case};
use crate::table::{TableEntry, ZmanTable};
use crate::visible_sunrise::VisibleSunriseTable;

/// Evaluates a rule table for dates and locations.
#[derive(Debug, Clone)]
pub struct ZmanRuleEngine {
    table: ZmanTable,
    config: ZmanConfig,
    visible_sunrise: Option<VisibleSunriseTable>,
}

impl ZmanRuleEngine {
    /// Engine over `table`; fails if `config` does not validate.
    pub fn new(table: ZmanTable, config: ZmanConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            table,
            config,
            visible_sunrise: None,
        })
    }

    /// Engine over the built-in table.
    pub fn standard(config: ZmanConfig) -> Result<Self, EngineError> {
        Self::new(ZmanTable::standard()?, config)
    }

    /// Prefer published visible-sunrise times where present.
    pub fn with_visible_sunrise(mut self, table: VisibleSunriseTable) -> Self {
        self.visible_sunrise = Some(table);
        self
    }

    pub fn table(&self) -> &ZmanTable {
        &self.table
    }

    pub fn config(&self) -> &ZmanConfig {
        &self.config
    }

    /// Every definition evaluated for `date` at `geo`.
    pub fn evaluate(&self, date: NaiveDate, geo: &GeoCoordinate) -> Result<ZmanSheet, EngineError> {
        let ctx = DayContext::new(date, geo, &self.config, self.visible_sunrise.as_ref())?;
        debug!(
            %date,
            location = geo.name(),
            hebrew = %ctx.hebrew,
            tags = ?ctx.tags.iter().collect::<Vec<_>>(),
            "evaluating zmanim"
        );
        Ok(self.evaluate_context(&ctx))
    }

    /// Every definition evaluated against a prepared context.
    pub fn evaluate_context(&self, ctx: &DayContext<'_>) -> ZmanSheet {
        let results = self
            .table
            .iter()
            .map(|entry| match entry {
                TableEntry::Definition(d) => evaluate_one(d, ctx),
                TableEntry::Malformed { id, .. } => malformed_result(id),
            })
            .collect();
        ZmanSheet {
            date: ctx.date,
            hebrew_date: ctx.hebrew,
            tags: ctx.tags,
            results,
        }
    }
}

fn evaluate_one(def: &ZmanDefinition, ctx: &DayContext<'_>) -> ZmanResult {
    let mut state = DisplayState::Visible;
    let mut diagnostics = Vec::new();

    let festival_day = def
        .festival
        .as_ref()
        .is_none_or(|tags| tags.iter().any(|t| ctx.tags.contains(*t)));
    if !festival_day {
        state = DisplayState::Suppressed;
        diagnostics.push(Diagnostic::NonProperYomTov);
    }

    let luach_ok = def
        .luach
        .is_none_or(|l| l.allows(ctx.config.hour_mode, ctx.config.in_israel));
    if !luach_ok {
        state = DisplayState::WrongConfig;
        diagnostics.push(Diagnostic::WrongLuach);
    }

    let mut pending = Pending {
        computed: compute(&def.compute, ctx),
        labels: def.labels.clone(),
        merge_labels: def.merge_labels.clone(),
    };
    if let Some(handler) = special_case(&def.id) {
        handler(&mut pending, ctx);
    }

    if let Some(Err(code)) = def.condition.map(|c| c.check(ctx)) {
        if state != DisplayState::WrongConfig {
            state = DisplayState::Suppressed;
        }
        diagnostics.push(Diagnostic::Condition(code));
    }

    let instant = pending.computed.instant();
    if instant.is_none() {
        if state != DisplayState::WrongConfig {
            state = DisplayState::Invalid;
        }
        diagnostics.push(Diagnostic::InvalidDate);
    }

    trace!(id = %def.id, ?state, ?diagnostics, "evaluated zman");
    ZmanResult {
        id: def.id.clone(),
        instant: instant.map(|t| round_instant(t, def.rounding)),
        display: state,
        labels: pending.labels,
        merge_labels: pending.merge_labels,
        diagnostics,
        ignore_next_upcoming: def.ignore_next_upcoming,
    }
}

fn malformed_result(id: &str) -> ZmanResult {
    ZmanResult {
        id: id.to_string(),
        instant: None,
        display: DisplayState::Invalid,
        labels: Labels::new(),
        merge_labels: None,
        diagnostics: vec![Diagnostic::MalformedDefinition],
        ignore_next_upcoming: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{ComputeFn, Condition, LuachRestriction};
    use crate::temporal_hour::HourMode;
    use zmanim_calendar::DayTag;

    fn geo() -> GeoCoordinate {
        GeoCoordinate::new("New York", 40.7128, -74.006, 10.0, "America/New_York").unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn invalid_config_rejected() {
        let config = ZmanConfig {
            stringent_tzet_degrees: -1.0,
            ..ZmanConfig::default()
        };
        assert!(ZmanRuleEngine::standard(config).is_err());
    }

    #[test]
    fn wrong_luach_survives_condition_failure() {
        let def = ZmanDefinition::new("x", ComputeFn::Sunset, "x", "x")
            .with_luach(LuachRestriction::Fixed)
            .with_condition(Condition::ErevPesach);
        let table = ZmanTable::new(vec![def]).unwrap();
        let engine = ZmanRuleEngine::new(table, ZmanConfig::default()).unwrap();
        let sheet = engine.evaluate(date(2024, 11, 13), &geo()).unwrap();
        let r = sheet.get("x").unwrap();
        assert_eq!(r.display, DisplayState::WrongConfig);
        assert_eq!(
            r.diagnostics,
            vec![Diagnostic::WrongLuach, Diagnostic::Condition("not-erev-pesach")]
        );
        assert!(r.instant.is_some());
    }

    #[test]
    fn festival_filter_suppresses() {
        let def = ZmanDefinition::new("x", ComputeFn::Sunset, "x", "x")
            .with_festival(vec![DayTag::Chanukah]);
        let table = ZmanTable::new(vec![def]).unwrap();
        let engine = ZmanRuleEngine::new(table, ZmanConfig::default()).unwrap();
        let r = engine.evaluate(date(2024, 11, 13), &geo()).unwrap();
        assert_eq!(r.results[0].display, DisplayState::Suppressed);
        assert_eq!(r.results[0].diagnostics, vec![Diagnostic::NonProperYomTov]);
        let r = engine.evaluate(date(2024, 12, 26), &geo()).unwrap();
        assert_eq!(r.results[0].display, DisplayState::Visible);
    }

    #[test]
    fn fixed_mode_hides_degree_rows() {
        let config = ZmanConfig {
            hour_mode: HourMode::Fixed,
            ..ZmanConfig::default()
        };
        let engine = ZmanRuleEngine::standard(config).unwrap();
        let sheet = engine.evaluate(date(2024, 11, 13), &geo()).unwrap();
        assert_eq!(sheet.get("alotHashachar").unwrap().display, DisplayState::WrongConfig);
        assert_eq!(sheet.get("alot72").unwrap().display, DisplayState::Visible);
    }

    #[test]
    fn malformed_row_keeps_its_slot() {
        let table = ZmanTable::from_json_str(
            r#"[{ "id": "a", "compute": { "fn": "sunrise" }, "labels": { "en": "A" } },
                { "id": "b", "compute": { "fn": "sunset" }, "luach": "lunar", "labels": {} },
                { "id": "c", "compute": { "fn": "sunset" }, "labels": { "en": "C" } }]"#,
        )
        .unwrap();
        let engine = ZmanRuleEngine::new(table, ZmanConfig::default()).unwrap();
        let sheet = engine.evaluate(date(2024, 11, 13), &geo()).unwrap();
        let ids: Vec<_> = sheet.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        let b = sheet.get("b").unwrap();
        assert_eq!(b.display, DisplayState::Invalid);
        assert_eq!(b.diagnostics, vec![Diagnostic::MalformedDefinition]);
        assert!(b.instant.is_none());
        assert!(sheet.get("a").unwrap().is_visible());
        assert!(sheet.get("c").unwrap().is_visible());
    }

    #[test]
    fn evaluates_under_a_trace_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        let engine = ZmanRuleEngine::standard(ZmanConfig::default()).unwrap();
        let sheet = tracing::subscriber::with_default(subscriber, || {
            engine.evaluate(date(2024, 11, 13), &geo())
        })
        .unwrap();
        assert_eq!(sheet.len(), engine.table().len());
    }

    #[test]
    fn out_of_range_date_is_an_error() {
        let engine = ZmanRuleEngine::standard(ZmanConfig::default()).unwrap();
        let r = engine.evaluate(NaiveDate::MIN, &geo());
        assert!(r.is_err());
    }
}

//! Whole-table evaluation for reference days.

use chrono::{NaiveDate, NaiveTime, TimeDelta, Timelike};
use zmanim_astro::GeoCoordinate;
use zmanim_calendar::DayTag;
use zmanim_engine::{
    Diagnostic, DisplayState, EngineError, HourMode, VisibleSunriseEntry, VisibleSunriseTable,
    ZmanConfig, ZmanRuleEngine, ZmanSheet, ZmanTable,
};

fn jerusalem() -> GeoCoordinate {
    GeoCoordinate::new("Jerusalem", 31.7767, 35.2345, 754.0, "Asia/Jerusalem").unwrap()
}

fn new_york() -> GeoCoordinate {
    GeoCoordinate::new("New York", 40.7128, -74.006, 10.0, "America/New_York").unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn israel() -> ZmanConfig {
    ZmanConfig {
        in_israel: true,
        ..ZmanConfig::default()
    }
}

fn display(sheet: &ZmanSheet, id: &str) -> DisplayState {
    sheet.get(id).unwrap_or_else(|| panic!("no {id}")).display
}

#[test]
fn every_definition_yields_one_result() {
    let engine = ZmanRuleEngine::standard(ZmanConfig::default()).unwrap();
    let table = engine.table().clone();
    for geo in [jerusalem(), new_york()] {
        let mut d = date(2024, 1, 1);
        while d < date(2025, 1, 1) {
            let sheet = engine.evaluate(d, &geo).unwrap();
            assert_eq!(sheet.len(), table.len());
            for (r, def) in sheet.iter().zip(&table) {
                assert_eq!(r.id, def.id());
                assert!((-2..=1).contains(&r.display.code()));
                if let Some(t) = r.instant {
                    assert_eq!(t.second(), 0, "{} on {d}", r.id);
                }
            }
            d += TimeDelta::days(7);
        }
    }
}

#[test]
fn jerusalem_first_day_of_pesach_in_israel() {
    let engine = ZmanRuleEngine::standard(israel()).unwrap();
    let sheet = engine.evaluate(date(2024, 4, 23), &jerusalem()).unwrap();
    assert_eq!(sheet.hebrew_date.day(), 15);

    // Chol HaMoed follows in Israel: no candles tonight, time still computed
    let candles = sheet.get("candleLighting").unwrap();
    assert_eq!(candles.display, DisplayState::Suppressed);
    assert_eq!(candles.diagnostics, vec![Diagnostic::Condition("not-shabbat")]);
    let sunset = sheet.get("sunset").unwrap();
    assert_eq!(sunset.display, DisplayState::Visible);
    assert_eq!(
        candles.instant.unwrap(),
        sunset.instant.unwrap() - TimeDelta::minutes(18)
    );

    let tzet = sheet.get("tzetMelakha").unwrap();
    assert_eq!(tzet.display, DisplayState::Visible);
    assert_eq!(tzet.label("en"), Some("End of Yom Tov (8.5°)"));
    assert_eq!(tzet.label("he"), Some("צאת החג (8.5°)"));

    for id in ["alotHashachar", "misheyakir", "sofZmanShmaMga16", "tzet"] {
        let r = sheet.get(id).unwrap();
        assert_eq!(r.display, DisplayState::WrongConfig, "{id}");
        assert!(r.diagnostics.contains(&Diagnostic::WrongLuach));
    }

    let fast = sheet.get("fastBegins").unwrap();
    assert_eq!(fast.display, DisplayState::Suppressed);
    assert_eq!(
        fast.diagnostics,
        vec![Diagnostic::NonProperYomTov, Diagnostic::Condition("not-dawn-fast")]
    );
    assert_eq!(display(&sheet, "sofZmanAchilatChametz"), DisplayState::Suppressed);
    assert_eq!(display(&sheet, "chatzotLayla"), DisplayState::Suppressed);
    assert_eq!(
        sheet.get("sunrise").unwrap().label("en"),
        Some("Sunrise (sea level)")
    );

    let at = |id: &str| sheet.get(id).unwrap().instant.unwrap();
    assert!(at("alot72") < at("sunrise"));
    assert!(at("sunrise") < at("sofZmanShmaMga"));
    assert!(at("sofZmanShmaMga") < at("sofZmanShma"));
    assert!(at("sofZmanShma") < at("chatzot"));
    assert!(at("chatzot") < at("minchaGedola"));
    assert!(at("plagHamincha") < at("sunset"));
    assert!(at("sunset") < at("tzetStringent"));
    assert!(at("tzetMelakha") < at("tzetRabbeinuTam"));
}

#[test]
fn erev_pesach_shows_chametz_times() {
    let engine = ZmanRuleEngine::standard(israel()).unwrap();
    let sheet = engine.evaluate(date(2024, 4, 22), &jerusalem()).unwrap();
    for id in ["sofZmanAchilatChametz", "sofZmanBiurChametz", "candleLighting"] {
        assert_eq!(display(&sheet, id), DisplayState::Visible, "{id}");
    }
    let eat = sheet.get("sofZmanAchilatChametz").unwrap().instant.unwrap();
    let burn = sheet.get("sofZmanBiurChametz").unwrap().instant.unwrap();
    assert!(eat < burn);
    // 13 Nisan was the night before
    let sheet = engine.evaluate(date(2024, 4, 21), &jerusalem()).unwrap();
    assert_eq!(display(&sheet, "chatzotLayla"), DisplayState::Visible);
}

#[test]
fn jerusalem_erev_pesach_lights_candles_before_sunset() {
    let engine = ZmanRuleEngine::standard(israel()).unwrap();
    let sheet = engine.evaluate(date(2024, 4, 22), &jerusalem()).unwrap();
    assert_eq!(sheet.hebrew_date.day(), 14);
    assert!(sheet.tags.contains(DayTag::ErevPesach));

    let candles = sheet.get("candleLighting").unwrap();
    assert_eq!(candles.display, DisplayState::Visible);
    assert!(candles.diagnostics.is_empty());
    let sunset = sheet.get("sunset").unwrap().instant.unwrap();
    assert_eq!(candles.instant.unwrap(), sunset - TimeDelta::minutes(18));
    for id in ["sunset", "tzetStringent", "tzetMelakha", "tzetRabbeinuTam"] {
        assert!(sheet.get(id).unwrap().instant.is_some(), "{id}");
    }
    assert_eq!(display(&sheet, "tzetMelakha"), DisplayState::Suppressed);
}

#[test]
fn tisha_bav_begins_at_sunset_the_evening_before() {
    let engine = ZmanRuleEngine::standard(ZmanConfig::default()).unwrap();
    let eve = engine.evaluate(date(2024, 8, 12), &new_york()).unwrap();
    let evening = eve.get("fastBeginsEvening").unwrap();
    assert_eq!(evening.display, DisplayState::Visible);
    assert_eq!(evening.instant, eve.get("sunset").unwrap().instant);
    assert_eq!(display(&eve, "fastBegins"), DisplayState::Suppressed);

    let fast = engine.evaluate(date(2024, 8, 13), &new_york()).unwrap();
    let dawn = fast.get("fastBegins").unwrap();
    assert_eq!(dawn.display, DisplayState::Suppressed);
    assert_eq!(dawn.diagnostics, vec![Diagnostic::Condition("not-dawn-fast")]);
    assert_eq!(display(&fast, "fastBeginsEvening"), DisplayState::Suppressed);

    // Tzom Gedaliah 5785, Sunday 6 October 2024
    let gedaliah = engine.evaluate(date(2024, 10, 6), &new_york()).unwrap();
    assert_eq!(display(&gedaliah, "fastBegins"), DisplayState::Visible);
}

#[test]
fn malformed_row_leaves_the_rest_of_the_table() {
    let mut rows: Vec<serde_json::Value> =
        serde_json::from_str(include_str!("../data/standard_table.json")).unwrap();
    rows[3]["rounding"] = serde_json::Value::from("sideways");
    let table = ZmanTable::from_json_str(&serde_json::Value::Array(rows).to_string()).unwrap();
    assert_eq!(table.malformed_count(), 1);
    let engine = ZmanRuleEngine::new(table, ZmanConfig::default()).unwrap();
    let sheet = engine.evaluate(date(2024, 11, 13), &new_york()).unwrap();
    assert_eq!(sheet.len(), engine.table().len());
    let sunrise = sheet.get("sunrise").unwrap();
    assert_eq!(sunrise.display, DisplayState::Invalid);
    assert_eq!(sunrise.diagnostics, vec![Diagnostic::MalformedDefinition]);
    for id in ["alotHashachar", "misheyakir", "sofZmanShma", "sunset"] {
        assert_eq!(display(&sheet, id), DisplayState::Visible, "{id}");
    }
}

#[test]
fn diaspora_second_day_candles_after_nightfall() {
    let engine = ZmanRuleEngine::standard(ZmanConfig::default()).unwrap();
    let sheet = engine.evaluate(date(2024, 4, 23), &new_york()).unwrap();
    let candles = sheet.get("candleLighting").unwrap();
    assert_eq!(candles.display, DisplayState::Visible);
    assert_eq!(candles.label("en"), Some("Candle lighting (after nightfall)"));
    assert!(candles.instant > sheet.get("sunset").unwrap().instant);
}

#[test]
fn polar_day_marks_sun_times_invalid() {
    let geo = GeoCoordinate::new("70N", 70.0, 23.0, 0.0, "Europe/Oslo").unwrap();
    let engine = ZmanRuleEngine::standard(ZmanConfig::default()).unwrap();
    let sheet = engine.evaluate(date(2024, 6, 21), &geo).unwrap();
    for id in [
        "alotHashachar",
        "alot72",
        "sunrise",
        "sofZmanShmaMga",
        "sofZmanShma",
        "sofZmanTfilla",
        "minchaGedola",
        "minchaKetana",
        "plagHamincha",
        "candleLighting",
        "sunset",
        "tzetStringent",
        "tzet",
        "tzetMelakha",
        "tzetRabbeinuTam",
    ] {
        let r = sheet.get(id).unwrap();
        assert_eq!(r.display, DisplayState::Invalid, "{id}");
        assert!(r.instant.is_none());
        assert!(r.diagnostics.contains(&Diagnostic::InvalidDate), "{id}");
    }
    assert_eq!(display(&sheet, "chatzot"), DisplayState::Visible);
}

#[test]
fn wrong_luach_is_not_overridden_by_polar_day() {
    let geo = GeoCoordinate::new("70N", 70.0, 23.0, 0.0, "Europe/Oslo").unwrap();
    let config = ZmanConfig {
        hour_mode: HourMode::Fixed,
        ..ZmanConfig::default()
    };
    let engine = ZmanRuleEngine::standard(config).unwrap();
    let sheet = engine.evaluate(date(2024, 6, 21), &geo).unwrap();
    let r = sheet.get("tzet").unwrap();
    assert_eq!(r.display, DisplayState::WrongConfig);
    assert_eq!(r.diagnostics, vec![Diagnostic::WrongLuach, Diagnostic::InvalidDate]);
}

#[test]
fn visible_sunrise_overrides_calculation() {
    let mut table = VisibleSunriseTable::new();
    table.insert(
        date(2024, 4, 23),
        VisibleSunriseEntry {
            time: NaiveTime::from_hms_opt(6, 5, 40).unwrap(),
            approximate: false,
        },
    );
    let engine = ZmanRuleEngine::standard(israel())
        .unwrap()
        .with_visible_sunrise(table);
    let sheet = engine.evaluate(date(2024, 4, 23), &jerusalem()).unwrap();
    let sunrise = sheet.get("sunrise").unwrap();
    assert_eq!(sunrise.label("en"), Some("Visible Sunrise"));
    let t = sunrise.instant.unwrap();
    // 06:05:40 IDT rounds later to 06:06
    assert_eq!((t.hour(), t.minute()), (3, 6));

    let other = engine.evaluate(date(2024, 4, 24), &jerusalem()).unwrap();
    assert_eq!(
        other.get("sunrise").unwrap().label("en"),
        Some("Sunrise (sea level)")
    );
}

#[test]
fn next_upcoming_follows_the_day() {
    let engine = ZmanRuleEngine::standard(ZmanConfig::default()).unwrap();
    let sheet = engine.evaluate(date(2024, 11, 13), &new_york()).unwrap();
    let sunrise = sheet.get("sunrise").unwrap().instant.unwrap();
    let next = sheet.next_upcoming(sunrise).unwrap();
    assert!(next.instant.unwrap() > sunrise);
    assert!(next.is_visible());
    assert_eq!(
        sheet.recompute_delay(sunrise),
        Some(next.instant.unwrap() - sunrise)
    );
    let after_all = sheet.get("tzetStringent").unwrap().instant.unwrap() + TimeDelta::hours(3);
    assert!(sheet.next_upcoming(after_all).is_none());
}

#[test]
fn table_errors_surface() {
    let unknown = ZmanTable::from_json_str(
        r#"[{ "id": "moon", "compute": { "fn": "moonrise" }, "labels": { "en": "Moon" } }]"#,
    );
    assert!(matches!(unknown, Err(EngineError::UnknownComputeFunction { .. })));
    let dup = ZmanTable::from_json_str(
        r#"[{ "id": "a", "compute": { "fn": "sunset" }, "labels": {} },
            { "id": "a", "compute": { "fn": "sunset" }, "labels": {} }]"#,
    );
    assert!(matches!(dup, Err(EngineError::DuplicateId(_))));
}

#[test]
fn sheet_serializes_display_codes() {
    let engine = ZmanRuleEngine::standard(israel()).unwrap();
    let sheet = engine.evaluate(date(2024, 4, 23), &jerusalem()).unwrap();
    let v = serde_json::to_value(&sheet).unwrap();
    let results = v["results"].as_array().unwrap();
    assert_eq!(results.len(), sheet.len());
    let candles = results.iter().find(|r| r["id"] == "candleLighting").unwrap();
    assert_eq!(candles["display"], 0);
    assert_eq!(candles["diagnostics"][0], "not-shabbat");
}

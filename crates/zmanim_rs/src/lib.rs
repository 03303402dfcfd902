//! Convenience facade for the zmanim crates.
//!
//! Provides one-call functions that take civil dates and a location and
//! hide table loading, Hebrew conversion and engine construction, plus a
//! [`DayCursor`] for rendering ranges of days.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use zmanim_rs::*;
//!
//! let geo = GeoCoordinate::new("Jerusalem", 31.7767, 35.2345, 754.0, "Asia/Jerusalem")?;
//! let date = chrono::NaiveDate::from_ymd_opt(2024, 4, 23).unwrap();
//! let sheet = zmanim(date, &geo, &ZmanConfig::default())?;
//! for r in sheet.visible() {
//!     println!("{} {:?}", r.label("en").unwrap_or(&r.id), r.instant);
//! }
//! ```

pub mod convenience;
pub mod cursor;
pub mod error;

pub use convenience::{
    daf, day_info, gregorian_date, hebrew_date, molad_of, next_parasha, next_zman, zmanim,
};
pub use cursor::{CalendarDay, DayCursor};
pub use error::ZmanimError;

// Re-export the types the convenience functions take and return.
pub use zmanim_astro::{AstronomicalDay, GeoCoordinate, SolarInstant};
pub use zmanim_calendar::{
    DafYomi, DayTag, DayTags, HebrewDate, HebrewMonth, Holiday, HolidayEvent, Molad, Parasha,
    Parsha, Tractate,
};
pub use zmanim_engine::{
    Diagnostic, DisplayState, HourMode, MelakhaEndOffset, VisibleSunriseTable, ZmanConfig,
    ZmanResult, ZmanRuleEngine, ZmanSheet, ZmanTable,
};

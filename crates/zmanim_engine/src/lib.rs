//! Seasonal hours and the declarative zman rule engine.
//!
//! This crate provides:
//! - [`TemporalHourModel`]: seasonal hours over a sunrise-to-sunset span
//! - [`ZmanDefinition`] rows and the ordered [`ZmanTable`], loadable from JSON
//! - [`ZmanConfig`]: community customs, loadable from TOML
//! - [`ZmanRuleEngine`]: per-day evaluation into a [`ZmanSheet`] with
//!   display states, diagnostics and minute rounding

pub mod compute;
pub mod conditions;
pub mod config;
pub mod context;
pub mod definition;
pub mod engine;
pub mod error;
pub mod rounding;
pub mod sheet;
pub mod special_cases;
pub mod table;
pub mod temporal_hour;
pub mod visible_sunrise;

pub use compute::{Computed, OffsetMeta, SunriseResult, compute};
pub use config::{
    DEFAULT_CANDLE_LIGHTING_MINUTES, DEFAULT_MELAKHA_END_DEGREES, DEFAULT_STRINGENT_TZET_DEGREES,
    MelakhaEnd, MelakhaEndOffset, ZmanConfig,
};
pub use context::{DayContext, MGA_DEGREES, MGA_MINUTES, RABBEINU_TAM_MINUTES};
pub use definition::{
    ComputeFn, Condition, Labels, LuachRestriction, Rounding, SeasonalBasis, ZmanDefinition,
};
pub use engine::ZmanRuleEngine;
pub use error::EngineError;
pub use rounding::round_instant;
pub use sheet::{Diagnostic, DisplayState, ZmanResult, ZmanSheet};
pub use table::{TableEntry, ZmanTable};
pub use temporal_hour::{HOURS_PER_DAY, HourMode, MINUTES_PER_DAY, TemporalHourModel};
pub use visible_sunrise::{VisibleSunriseEntry, VisibleSunriseFlags, VisibleSunriseTable};

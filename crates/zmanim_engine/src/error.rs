//! Error types for rule tables, configuration and evaluation.

use thiserror::Error;
use zmanim_calendar::CalendarError;

/// Errors from loading a rule table or configuration, or from evaluating
/// a date outside the calendar's domain.
///
/// Polar non-events and configuration mismatches are never errors; they
/// surface as display states on the individual results.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// A definition names a compute function the engine does not know.
    #[error("zman `{id}` uses unknown compute function `{function}`")]
    UnknownComputeFunction { id: String, function: String },
    /// Two definitions share an id.
    #[error("duplicate zman id `{0}`")]
    DuplicateId(String),
    /// JSON rule table or visible-sunrise table failed to parse.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// TOML configuration failed to parse.
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
    /// Configuration parsed but holds inconsistent values.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Date outside the calendar's domain.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

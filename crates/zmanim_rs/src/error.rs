//! Unified error type for the facade.

use thiserror::Error;

use zmanim_astro::AstroError;
use zmanim_calendar::CalendarError;
use zmanim_engine::EngineError;
use zmanim_time::TimeError;

/// Any error from the underlying crates.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ZmanimError {
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Astro(#[from] AstroError),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

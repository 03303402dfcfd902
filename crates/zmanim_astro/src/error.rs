//! Error types for coordinates and solar calculations.

use thiserror::Error;
use zmanim_time::TimeError;

/// Errors from building a [`GeoCoordinate`](crate::GeoCoordinate).
///
/// Astronomical non-events (polar day and night) are not errors; they are
/// reported as [`SolarInstant::Unavailable`](crate::SolarInstant::Unavailable).
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AstroError {
    /// Latitude outside [-90, 90] or not finite.
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),
    /// Longitude outside [-180, 180] or not finite.
    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),
    /// Negative or non-finite elevation.
    #[error("elevation {0} m must be a finite non-negative number")]
    InvalidElevation(f64),
    /// Zone lookup or date conversion failure.
    #[error(transparent)]
    Time(#[from] TimeError),
}

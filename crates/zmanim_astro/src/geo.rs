//! Geographic coordinate with time zone, plus geodesic helpers.
//!
//! Distances and bearings use the WGS-84 ellipsoid (Vincenty inverse
//! formula) or a spherical Earth for rhumb lines.
//!
//! Sources: Vincenty, "Direct and Inverse Solutions of Geodesics on the
//! Ellipsoid", Survey Review 23 (1975); Williams, Aviation Formulary.

use std::f64::consts::PI;

use chrono::{NaiveDate, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::{OffsetComponents, Tz};
use serde::{Deserialize, Serialize};

use crate::error::AstroError;
use zmanim_time::parse_time_zone;

/// WGS-84 semi-major axis in metres.
const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 semi-minor axis in metres.
const WGS84_B: f64 = 6_356_752.3142;
/// WGS-84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// Mean Earth radius in metres for rhumb-line distances.
const MEAN_EARTH_RADIUS_M: f64 = 6_371_000.0;

const VINCENTY_MAX_ITERATIONS: usize = 20;
const VINCENTY_CONVERGENCE: f64 = 1.0e-12;

/// Hours of local-mean-time offset beyond which the civil date is shifted.
const ANTIMERIDIAN_THRESHOLD_HOURS: f64 = 20.0;

/// An observer location: latitude, longitude, elevation, IANA zone and name.
///
/// Immutable after construction. Latitude is north positive, longitude east
/// positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoCoordinateRecord", into = "GeoCoordinateRecord")]
pub struct GeoCoordinate {
    name: String,
    latitude: f64,
    longitude: f64,
    elevation_m: f64,
    time_zone: Tz,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeoCoordinateRecord {
    #[serde(default)]
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    elevation_m: f64,
    time_zone: String,
}

impl TryFrom<GeoCoordinateRecord> for GeoCoordinate {
    type Error = AstroError;

    fn try_from(r: GeoCoordinateRecord) -> Result<Self, Self::Error> {
        let tz = parse_time_zone(&r.time_zone)?;
        Self::with_zone(r.name, r.latitude, r.longitude, r.elevation_m, tz)
    }
}

impl From<GeoCoordinate> for GeoCoordinateRecord {
    fn from(g: GeoCoordinate) -> Self {
        Self {
            name: g.name,
            latitude: g.latitude,
            longitude: g.longitude,
            elevation_m: g.elevation_m,
            time_zone: g.time_zone.name().to_string(),
        }
    }
}

impl GeoCoordinate {
    /// Build a coordinate from an IANA zone id.
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        elevation_m: f64,
        time_zone: &str,
    ) -> Result<Self, AstroError> {
        let tz = parse_time_zone(time_zone)?;
        Self::with_zone(name, latitude, longitude, elevation_m, tz)
    }

    /// Build a coordinate from an already-resolved zone.
    pub fn with_zone(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        elevation_m: f64,
        time_zone: Tz,
    ) -> Result<Self, AstroError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AstroError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AstroError::InvalidLongitude(longitude));
        }
        if !elevation_m.is_finite() || elevation_m < 0.0 {
            return Err(AstroError::InvalidElevation(elevation_m));
        }
        Ok(Self {
            name: name.into(),
            latitude,
            longitude,
            elevation_m,
            time_zone,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn elevation_m(&self) -> f64 {
        self.elevation_m
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// A copy of this coordinate at a different elevation.
    pub fn at_elevation(&self, elevation_m: f64) -> Result<Self, AstroError> {
        Self::with_zone(
            self.name.clone(),
            self.latitude,
            self.longitude,
            elevation_m,
            self.time_zone,
        )
    }

    /// Offset of local mean time from the zone's standard time, in seconds.
    ///
    /// Positive when the sun transits earlier than the zone's clock implies.
    /// Daylight saving is not included.
    pub fn local_mean_time_offset_seconds(&self, date: NaiveDate) -> f64 {
        let noon = date.and_time(NaiveTime::MIN) + TimeDelta::hours(12);
        let standard = self
            .time_zone
            .offset_from_utc_datetime(&noon)
            .base_utc_offset()
            .num_seconds();
        self.longitude * 240.0 - standard as f64
    }

    /// Day shift (-1, 0 or +1) for zones on the far side of the antimeridian.
    ///
    /// When local mean time differs from zone time by 20 hours or more, the
    /// solar day that belongs to the local civil date is the neighbouring
    /// calendar date at the geometric longitude.
    pub fn antimeridian_adjustment(&self, date: NaiveDate) -> i64 {
        let hours = self.local_mean_time_offset_seconds(date) / 3600.0;
        if hours >= ANTIMERIDIAN_THRESHOLD_HOURS {
            1
        } else if hours <= -ANTIMERIDIAN_THRESHOLD_HOURS {
            -1
        } else {
            0
        }
    }

    /// Vincenty inverse solution to `other`.
    ///
    /// Returns `None` if the iteration fails to converge (nearly antipodal
    /// points).
    pub fn geodesic_to(&self, other: &GeoCoordinate) -> Option<GeodesicInverse> {
        vincenty_inverse(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    /// Ellipsoidal distance to `other` in metres.
    pub fn geodesic_distance_m(&self, other: &GeoCoordinate) -> Option<f64> {
        self.geodesic_to(other).map(|g| g.distance_m)
    }

    /// Initial great-circle bearing to `other`, degrees in [0, 360).
    pub fn initial_bearing_deg(&self, other: &GeoCoordinate) -> Option<f64> {
        self.geodesic_to(other).map(|g| g.initial_bearing_deg)
    }

    /// Final great-circle bearing arriving at `other`, degrees in [0, 360).
    pub fn final_bearing_deg(&self, other: &GeoCoordinate) -> Option<f64> {
        self.geodesic_to(other).map(|g| g.final_bearing_deg)
    }

    /// Constant bearing of the rhumb line to `other`, degrees in [0, 360).
    pub fn rhumb_line_bearing_deg(&self, other: &GeoCoordinate) -> f64 {
        let (_, d_phi, d_lon) = rhumb_terms(self, other);
        (d_lon.atan2(d_phi).to_degrees() + 360.0) % 360.0
    }

    /// Rhumb-line distance to `other` in metres on a spherical Earth.
    pub fn rhumb_line_distance_m(&self, other: &GeoCoordinate) -> f64 {
        let (d_lat, d_phi, d_lon) = rhumb_terms(self, other);
        let q = if d_lat.abs() > 1.0e-10 {
            d_lat / d_phi
        } else {
            self.latitude.to_radians().cos()
        };
        (d_lat * d_lat + q * q * d_lon * d_lon).sqrt() * MEAN_EARTH_RADIUS_M
    }
}

/// Result of the Vincenty inverse problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodesicInverse {
    pub distance_m: f64,
    pub initial_bearing_deg: f64,
    pub final_bearing_deg: f64,
}

fn normalize_bearing(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// (Δlat, Δψ, Δlon) in radians, with Δlon taken the short way round.
fn rhumb_terms(from: &GeoCoordinate, to: &GeoCoordinate) -> (f64, f64, f64) {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let mut d_lon = (to.longitude - from.longitude).to_radians();
    let d_phi = ((lat2 / 2.0 + PI / 4.0).tan() / (lat1 / 2.0 + PI / 4.0).tan()).ln();
    if d_lon.abs() > PI {
        d_lon = if d_lon > 0.0 {
            -(2.0 * PI - d_lon)
        } else {
            2.0 * PI + d_lon
        };
    }
    (lat2 - lat1, d_phi, d_lon)
}

fn vincenty_inverse(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Option<GeodesicInverse> {
    let (a, b, f) = (WGS84_A, WGS84_B, WGS84_F);
    let l = (lon2 - lon1).to_radians();
    let u1 = ((1.0 - f) * lat1.to_radians().tan()).atan();
    let u2 = ((1.0 - f) * lat2.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut converged = false;
    let (mut sin_lambda, mut cos_lambda) = (0.0, 0.0);
    let (mut sin_sigma, mut cos_sigma, mut sigma) = (0.0, 0.0, 0.0);
    let (mut cos_sq_alpha, mut cos_2sigma_m) = (0.0, 0.0);

    for _ in 0..VINCENTY_MAX_ITERATIONS {
        (sin_lambda, cos_lambda) = lambda.sin_cos();
        sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            // coincident points
            return Some(GeodesicInverse {
                distance_m: 0.0,
                initial_bearing_deg: 0.0,
                final_bearing_deg: 0.0,
            });
        }
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        cos_2sigma_m = if cos_sq_alpha == 0.0 {
            // equatorial line
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));
        if (lambda - previous).abs() <= VINCENTY_CONVERGENCE {
            converged = true;
            break;
        }
    }
    if !converged {
        return None;
    }

    let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
    let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = big_b
        * sin_sigma
        * (cos_2sigma_m
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                    - big_b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma.powi(2))
                        * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

    let fwd = (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
    let rev = (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda);

    Some(GeodesicInverse {
        distance_m: b * big_a * (sigma - delta_sigma),
        initial_bearing_deg: normalize_bearing(fwd.to_degrees()),
        final_bearing_deg: normalize_bearing(rev.to_degrees()),
    })
}

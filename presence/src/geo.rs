//! Geofence validation.
//!
//! Distances are great-circle metres from the haversine formula on a
//! spherical earth. The measured distance is always reported, in range or
//! not, so denials can show the student how far away they were and audits
//! can replay the decision.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Mean earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Great-circle distance between two points in metres.
pub fn haversine_distance_m(a: Coordinates, b: Coordinates) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// An institution's allowed confirmation area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geofence {
    pub center: Coordinates,
    pub radius_m: f64,
}

impl Geofence {
    pub fn new(center: Coordinates, radius_m: f64) -> Self {
        Self { center, radius_m }
    }

    /// Places a point relative to the fence. A distance exactly equal to the
    /// radius counts as in range.
    pub fn locate(&self, point: Coordinates) -> GeofenceOutcome {
        let distance_m = haversine_distance_m(self.center, point);
        if distance_m <= self.radius_m {
            GeofenceOutcome::InRange { distance_m }
        } else {
            GeofenceOutcome::OutOfRange { distance_m }
        }
    }
}

/// Where a point sits relative to a geofence, with the measured distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "position", rename_all = "snake_case")]
pub enum GeofenceOutcome {
    InRange { distance_m: f64 },
    OutOfRange { distance_m: f64 },
}

impl GeofenceOutcome {
    pub fn distance_m(&self) -> f64 {
        match self {
            GeofenceOutcome::InRange { distance_m } => *distance_m,
            GeofenceOutcome::OutOfRange { distance_m } => *distance_m,
        }
    }
}

/// Why the submitting device could not produce coordinates.
///
/// Mirrors the browser geolocation failure codes one to one; each cause keeps
/// its own message so a denial tells the student what to fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LocationError {
    Denied,
    Unavailable,
    Timeout,
}

impl LocationError {
    pub fn reason(&self) -> &'static str {
        match self {
            LocationError::Denied => "location permission was denied",
            LocationError::Unavailable => "device location is unavailable",
            LocationError::Timeout => "timed out waiting for device location",
        }
    }
}

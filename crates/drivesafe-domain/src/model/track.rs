use chrono::NaiveDateTime;
use drivesafe_types::GeoPoint;
use serde::{Deserialize, Serialize};

/// One GPS fix from a recording session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSample {
    pub timestamp: NaiveDateTime,
    pub point: GeoPoint,
    /// Reported ground speed (m/s); absent when the receiver had no speed fix
    pub speed_mps: Option<f64>,
}

impl TrackSample {
    pub fn new(timestamp: NaiveDateTime, latitude: f64, longitude: f64, speed_mps: Option<f64>) -> Self {
        Self {
            timestamp,
            point: GeoPoint::new(latitude, longitude),
            speed_mps,
        }
    }
}

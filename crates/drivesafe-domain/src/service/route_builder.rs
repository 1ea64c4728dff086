//! Accumulates GPS fixes into a route with distance and speed statistics

use chrono::NaiveDateTime;
use drivesafe_types::{GeoPoint, Route};

use crate::model::TrackSample;

/// Mean Earth radius (IUGG), meters
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;

/// Great-circle distance between two points, meters
pub fn haversine_distance_m(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_MEAN_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// In-progress recording session
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    started_at: NaiveDateTime,
    points: Vec<GeoPoint>,
    total_distance_m: f64,
    max_speed_mps: f64,
}

impl RouteBuilder {
    pub fn start(started_at: NaiveDateTime) -> Self {
        Self {
            started_at,
            points: Vec::new(),
            total_distance_m: 0.0,
            max_speed_mps: 0.0,
        }
    }

    pub fn push(&mut self, sample: &TrackSample) {
        if let Some(prev) = self.points.last() {
            self.total_distance_m += haversine_distance_m(prev, &sample.point);
        }
        self.points.push(sample.point);

        if let Some(speed) = sample.speed_mps {
            if speed > self.max_speed_mps {
                self.max_speed_mps = speed;
            }
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn total_distance_m(&self) -> f64 {
        self.total_distance_m
    }

    /// Close the session. Returns `None` if no point was recorded.
    pub fn finish(
        self,
        id: String,
        user_id: String,
        ended_at: NaiveDateTime,
        recorded_at: NaiveDateTime,
    ) -> Option<Route> {
        if self.points.is_empty() {
            return None;
        }

        let duration_seconds = (ended_at - self.started_at).num_milliseconds() as f64 / 1000.0;
        let average_speed_mps = if duration_seconds > 0.0 {
            self.total_distance_m / duration_seconds
        } else {
            0.0
        };

        Some(Route {
            id,
            user_id,
            recorded_at,
            path_points: self.points,
            start_time: self.started_at,
            end_time: ended_at,
            total_distance_m: self.total_distance_m,
            average_speed_mps,
            max_speed_mps: self.max_speed_mps,
        })
    }
}

/// Build a route spanning the first to the last sample
pub fn route_from_samples(
    id: String,
    user_id: String,
    samples: &[TrackSample],
    recorded_at: NaiveDateTime,
) -> Option<Route> {
    let first = samples.first()?;
    let last = samples.last()?;
    let mut builder = RouteBuilder::start(first.timestamp);
    for sample in samples {
        builder.push(sample);
    }
    builder.finish(id, user_id, last.timestamp, recorded_at)
}

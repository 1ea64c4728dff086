//! Route Service - recorded drives and their statistics

use std::sync::Arc;

use drivesafe_domain::model::TrackSample;
use drivesafe_domain::repository::RouteRepository;
use drivesafe_domain::service::{route_from_samples, PerformanceSnapshot, PerformanceTracker};
use drivesafe_domain::Clock;
use drivesafe_types::{Error, Result, Route};
use uuid::Uuid;

pub struct RouteService<R: RouteRepository> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: RouteRepository> RouteService<R> {
    pub fn new(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Build a route from a recorded track and store it under a new id
    pub fn record_from_samples(&self, user_id: &str, samples: &[TrackSample]) -> Result<Route> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(Error::InvalidInput("user id must not be empty".to_string()));
        }
        let id = Uuid::new_v4().to_string();
        let route = route_from_samples(id, user_id.to_string(), samples, self.clock.now())
            .ok_or_else(|| Error::InvalidInput("track contains no points".to_string()))?;
        self.repo.add(&route)?;
        Ok(route)
    }

    /// Routes newest first, optionally for one user only
    pub fn list(&self, user_id: Option<&str>) -> Result<Vec<Route>> {
        match user_id {
            Some(uid) => self.repo.find_by_user(uid),
            None => self.repo.find_all(),
        }
    }

    pub fn get(&self, id: &str) -> Result<Route> {
        self.repo
            .get(id)?
            .ok_or_else(|| Error::NotFound(format!("route {}", id)))
    }
}

/// Replay a track through the live performance tracker.
///
/// Samples without a speed fix are skipped.
pub fn analyze_performance(samples: &[TrackSample], threshold_mps: f64) -> PerformanceSnapshot {
    let mut tracker = PerformanceTracker::new(threshold_mps);
    for speed in samples.iter().filter_map(|s| s.speed_mps) {
        tracker.update(speed);
    }
    tracker.snapshot()
}

//! Live driving statistics from successive speed readings

use drivesafe_types::mps_to_kmh;
use serde::{Deserialize, Serialize};

/// Speed change (m/s between two readings) above which an event is counted
pub const DEFAULT_ACCELERATION_THRESHOLD_MPS: f64 = 3.0;

/// Point-in-time view of the tracker, speeds in whole km/h
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub current_kmh: i64,
    pub average_kmh: i64,
    pub max_kmh: i64,
    pub acceleration_events: u32,
    pub braking_events: u32,
    pub samples: usize,
}

#[derive(Debug, Clone)]
pub struct PerformanceTracker {
    threshold_mps: f64,
    speed_sum_mps: f64,
    samples: usize,
    last_speed_mps: f64,
    max_speed_mps: f64,
    acceleration_events: u32,
    braking_events: u32,
}

impl Default for PerformanceTracker {
    fn default() -> Self {
        Self::new(DEFAULT_ACCELERATION_THRESHOLD_MPS)
    }
}

impl PerformanceTracker {
    pub fn new(threshold_mps: f64) -> Self {
        Self {
            threshold_mps,
            speed_sum_mps: 0.0,
            samples: 0,
            last_speed_mps: 0.0,
            max_speed_mps: 0.0,
            acceleration_events: 0,
            braking_events: 0,
        }
    }

    /// Feed one speed reading (m/s)
    pub fn update(&mut self, speed_mps: f64) {
        self.speed_sum_mps += speed_mps;
        self.samples += 1;

        if speed_mps > self.max_speed_mps {
            self.max_speed_mps = speed_mps;
        }

        let delta = speed_mps - self.last_speed_mps;
        if delta > self.threshold_mps {
            self.acceleration_events += 1;
        } else if delta < -self.threshold_mps {
            self.braking_events += 1;
        }

        self.last_speed_mps = speed_mps;
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.threshold_mps);
    }

    pub fn snapshot(&self) -> PerformanceSnapshot {
        let average_mps = if self.samples > 0 {
            self.speed_sum_mps / self.samples as f64
        } else {
            0.0
        };
        PerformanceSnapshot {
            current_kmh: mps_to_kmh(self.last_speed_mps),
            average_kmh: mps_to_kmh(average_mps),
            max_kmh: mps_to_kmh(self.max_speed_mps),
            acceleration_events: self.acceleration_events,
            braking_events: self.braking_events,
            samples: self.samples,
        }
    }
}

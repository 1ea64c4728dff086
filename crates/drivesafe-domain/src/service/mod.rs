//! Domain services

pub mod expiration_calculator;
pub mod performance_tracker;
pub mod record_validator;
pub mod route_builder;

pub use expiration_calculator::{
    classify, classify_with_threshold, compute_insurance_expiration, countdown, days_until,
    ExpirationCalculator,
};
pub use performance_tracker::{PerformanceSnapshot, PerformanceTracker};
pub use record_validator::{validate_record, ValidationError};
pub use route_builder::{haversine_distance_m, route_from_samples, RouteBuilder};

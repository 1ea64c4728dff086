//! Use-case services

pub mod garage_service;
pub mod profile_service;
pub mod route_service;

pub use garage_service::{GarageService, GarageServiceError, ObligationView, VehicleDetail};
pub use profile_service::ProfileService;
pub use route_service::{analyze_performance, RouteService};

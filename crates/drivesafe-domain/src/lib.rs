//! Domain layer: obligation calculations, record validation, driving statistics
//! and the ports the outer layers implement.

pub mod clock;
pub mod model;
pub mod repository;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};

//! Domain model types

pub mod expiration;
pub mod license;
pub mod track;

pub use expiration::{CalendarDay, Countdown, ExpirationStatus, DEFAULT_NEAR_THRESHOLD_DAYS};
pub use license::{LicenseCategory, UnknownLicense};
pub use track::TrackSample;

//! Persistence implementations
//!
//! File-based implementations of the repository traits.

mod file_route_repo;
mod file_user_profile_repo;
mod file_vehicle_repo;

pub use file_route_repo::FileRouteRepository;
pub use file_user_profile_repo::FileUserProfileRepository;
pub use file_vehicle_repo::FileVehicleRepository;

use std::sync::{Mutex, MutexGuard};

use drivesafe_types::{Error, StoreError};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, Error> {
    mutex.lock().map_err(|_| StoreError::Poisoned.into())
}

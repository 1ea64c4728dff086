//! Repository adapters for persistence layer

use std::path::PathBuf;

use drivesafe_infra::persistence::{
    FileRouteRepository, FileUserProfileRepository, FileVehicleRepository,
};
use drivesafe_types::Result;

use crate::config::Config;

/// Open file-based vehicle repository
pub fn open_vehicle_repo(config: &Config) -> Result<FileVehicleRepository> {
    open_vehicle_repo_at(config.store_dir()?)
}

/// Open file-based route repository
pub fn open_route_repo(config: &Config) -> Result<FileRouteRepository> {
    open_route_repo_at(config.store_dir()?)
}

/// Open file-based user profile repository
pub fn open_profile_repo(config: &Config) -> Result<FileUserProfileRepository> {
    open_profile_repo_at(config.store_dir()?)
}

/// Open vehicle repository at a custom directory
pub fn open_vehicle_repo_at(store_dir: PathBuf) -> Result<FileVehicleRepository> {
    FileVehicleRepository::open(store_dir)
}

/// Open route repository at a custom directory
pub fn open_route_repo_at(store_dir: PathBuf) -> Result<FileRouteRepository> {
    FileRouteRepository::open(store_dir)
}

/// Open user profile repository at a custom directory
pub fn open_profile_repo_at(store_dir: PathBuf) -> Result<FileUserProfileRepository> {
    FileUserProfileRepository::open(store_dir)
}

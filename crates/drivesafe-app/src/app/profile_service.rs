//! Profile Service - user profile documents

use std::sync::Arc;

use drivesafe_domain::repository::UserProfileRepository;
use drivesafe_domain::model::license::normalize_licenses;
use drivesafe_domain::Clock;
use drivesafe_types::{Error, Result, UserProfile};
use tracing::info;

pub struct ProfileService<R: UserProfileRepository> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: UserProfileRepository> ProfileService<R> {
    pub fn new(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Stored profile for `uid`, or a blank one created on first access
    pub fn fetch_or_create(&self, uid: &str, email: &str) -> Result<UserProfile> {
        if uid.trim().is_empty() {
            return Err(Error::InvalidInput("user id must not be empty".to_string()));
        }
        if let Some(profile) = self.repo.get(uid)? {
            return Ok(profile);
        }

        let profile = UserProfile::blank(uid, email, self.clock.now());
        self.repo.set(&profile)?;
        info!(uid, "created user profile");
        Ok(profile)
    }

    /// Save a profile on behalf of the signed-in user `current_uid`.
    ///
    /// License codes are normalized to catalog order; the stored profile is returned.
    pub fn save(&self, current_uid: &str, profile: &UserProfile) -> Result<UserProfile> {
        if profile.uid != current_uid {
            return Err(Error::InvalidInput(format!(
                "profile {} cannot be saved by user {}",
                profile.uid, current_uid
            )));
        }

        let mut profile = profile.clone();
        profile.licenses =
            normalize_licenses(profile.licenses.as_slice()).map_err(|e| Error::InvalidInput(e.to_string()))?;
        self.repo.set(&profile)?;
        info!(uid = current_uid, "saved user profile");
        Ok(profile)
    }
}

//! File-based implementation of UserProfileRepository

use std::path::PathBuf;
use std::sync::Mutex;

use drivesafe_domain::repository::UserProfileRepository;
use drivesafe_store::DocumentStore;
use drivesafe_types::{Error, Result, UserProfile};

use super::lock;

/// Profile collection backed by `users.json`
pub struct FileUserProfileRepository {
    store: Mutex<DocumentStore<UserProfile>>,
}

impl FileUserProfileRepository {
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        Ok(Self {
            store: Mutex::new(DocumentStore::open(store_dir, "users")?),
        })
    }
}

impl UserProfileRepository for FileUserProfileRepository {
    fn get(&self, uid: &str) -> std::result::Result<Option<UserProfile>, Error> {
        Ok(lock(&self.store)?.get(uid).cloned())
    }

    fn set(&self, profile: &UserProfile) -> std::result::Result<(), Error> {
        lock(&self.store)?.set(profile.clone())
    }
}

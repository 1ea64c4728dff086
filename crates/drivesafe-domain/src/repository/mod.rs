//! Repository trait definitions for data persistence

mod watch;

pub use watch::{VehicleListWatch, VehicleWatch};

use drivesafe_types::{Error, Route, UserProfile, VehicleId, VehicleRecord};

/// Local store of vehicle records
pub trait VehicleRepository {
    /// Insert a new record and return its assigned id.
    ///
    /// Returns `None` when the record carries an id that already exists.
    fn create(&self, record: &VehicleRecord) -> Result<Option<VehicleId>, Error>;

    /// Replace an existing record; `false` if the id is unknown
    fn update(&self, record: &VehicleRecord) -> Result<bool, Error>;

    /// Remove a record; `false` if the id is unknown
    fn delete(&self, id: VehicleId) -> Result<bool, Error>;

    fn find_by_id(&self, id: VehicleId) -> Result<Option<VehicleRecord>, Error>;

    /// All records ordered by ascending id
    fn find_all(&self) -> Result<Vec<VehicleRecord>, Error>;

    /// Observe the full record list; a new value is published after every change
    fn watch_all(&self) -> VehicleListWatch;

    /// Observe a single record
    fn watch_by_id(&self, id: VehicleId) -> VehicleWatch {
        VehicleWatch::new(id, self.watch_all())
    }
}

/// Document collection of user profiles keyed by uid
pub trait UserProfileRepository {
    fn get(&self, uid: &str) -> Result<Option<UserProfile>, Error>;

    fn set(&self, profile: &UserProfile) -> Result<(), Error>;
}

/// Document collection of recorded routes
pub trait RouteRepository {
    fn add(&self, route: &Route) -> Result<(), Error>;

    fn get(&self, id: &str) -> Result<Option<Route>, Error>;

    /// Routes of one user, newest first
    fn find_by_user(&self, user_id: &str) -> Result<Vec<Route>, Error>;

    /// All routes, newest first
    fn find_all(&self) -> Result<Vec<Route>, Error>;
}

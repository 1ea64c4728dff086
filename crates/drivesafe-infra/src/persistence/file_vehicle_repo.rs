//! File-based implementation of VehicleRepository

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use drivesafe_domain::repository::{VehicleListWatch, VehicleRepository};
use drivesafe_store::VehicleStore;
use drivesafe_types::{Error, Result, VehicleId, VehicleRecord};

use super::lock;

/// Vehicle repository backed by `vehicles.json`
pub struct FileVehicleRepository {
    store: Mutex<VehicleStore>,
}

impl FileVehicleRepository {
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        Ok(Self {
            store: Mutex::new(VehicleStore::open(store_dir)?),
        })
    }
}

impl VehicleRepository for FileVehicleRepository {
    fn create(&self, record: &VehicleRecord) -> std::result::Result<Option<VehicleId>, Error> {
        lock(&self.store)?.add_vehicle(record.clone())
    }

    fn update(&self, record: &VehicleRecord) -> std::result::Result<bool, Error> {
        lock(&self.store)?.update_vehicle(record.clone())
    }

    fn delete(&self, id: VehicleId) -> std::result::Result<bool, Error> {
        lock(&self.store)?.remove_vehicle(id)
    }

    fn find_by_id(&self, id: VehicleId) -> std::result::Result<Option<VehicleRecord>, Error> {
        Ok(lock(&self.store)?.get_vehicle(id).cloned())
    }

    fn find_all(&self) -> std::result::Result<Vec<VehicleRecord>, Error> {
        Ok(lock(&self.store)?
            .all_vehicles()
            .into_iter()
            .cloned()
            .collect())
    }

    fn watch_all(&self) -> VehicleListWatch {
        // subscribing only reads the sender
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        VehicleListWatch::new(store.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_repository_round_trip_and_watch() {
        let dir = tempdir().unwrap();
        let repo = FileVehicleRepository::open(dir.path().to_path_buf()).unwrap();
        let mut watch = repo.watch_by_id(VehicleId(1));
        assert!(watch.current().is_none());

        let id = repo
            .create(&VehicleRecord::new("Fiat", "Panda", 2019))
            .unwrap()
            .unwrap();
        assert_eq!(id, VehicleId(1));
        assert!(watch.has_changed());
        assert_eq!(watch.current().map(|r| r.brand), Some("Fiat".to_string()));

        let mut record = repo.find_by_id(id).unwrap().unwrap();
        record.year = 2020;
        assert!(repo.update(&record).unwrap());
        assert_eq!(watch.current().map(|r| r.year), Some(2020));

        assert!(repo.delete(id).unwrap());
        assert!(watch.current().is_none());
        assert!(repo.find_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_watch_all_streams_mutations_until_repository_dropped() {
        let dir = tempdir().unwrap();
        let repo = FileVehicleRepository::open(dir.path().to_path_buf()).unwrap();
        let mut list = repo.watch_all();

        let id = repo
            .create(&VehicleRecord::new("Fiat", "Panda", 2019))
            .unwrap()
            .unwrap();
        let published = list.changed().await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].id, id);

        let mut record = published[0].clone();
        record.year = 2021;
        repo.update(&record).unwrap();
        assert_eq!(list.changed().await.unwrap()[0].year, 2021);

        drop(repo);
        assert!(list.changed().await.is_none());
    }
}

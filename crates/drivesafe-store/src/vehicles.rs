//! Vehicle store for the user's garage

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use drivesafe_types::{Result, VehicleId, VehicleRecord};
use tokio::sync::watch;
use tracing::debug;

use crate::read_store_file;

/// Persistent store for vehicle records.
///
/// Ids are assigned on insert as one past the highest id in the store.
/// Every successful mutation is written to disk and then published to
/// subscribers as the full id-ordered list.
pub struct VehicleStore {
    store_path: PathBuf,
    vehicles: BTreeMap<VehicleId, VehicleRecord>,
    notifier: watch::Sender<Vec<VehicleRecord>>,
}

impl VehicleStore {
    /// Create or load a vehicle store
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("vehicles.json");

        let records: Vec<VehicleRecord> = read_store_file(&store_path)?.unwrap_or_default();
        let vehicles: BTreeMap<_, _> = records.into_iter().map(|r| (r.id, r)).collect();
        debug!(path = %store_path.display(), count = vehicles.len(), "opened vehicle store");

        let (notifier, _) = watch::channel(vehicles.values().cloned().collect());
        Ok(Self {
            store_path,
            vehicles,
            notifier,
        })
    }

    /// Write `vehicles` to disk, then make it the in-memory state
    fn commit(&mut self, vehicles: BTreeMap<VehicleId, VehicleRecord>) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let mut writer = BufWriter::new(file);
        let records: Vec<&VehicleRecord> = vehicles.values().collect();
        serde_json::to_writer_pretty(&mut writer, &records)?;
        writer.flush()?;
        self.vehicles = vehicles;
        Ok(())
    }

    fn publish(&self) {
        self.notifier
            .send_replace(self.vehicles.values().cloned().collect());
    }

    fn next_id(&self) -> VehicleId {
        let max = self.vehicles.keys().next_back().map(|id| id.0).unwrap_or(0);
        VehicleId(max + 1)
    }

    /// Add a new vehicle.
    ///
    /// A record with an already-used id is ignored and `None` is returned.
    pub fn add_vehicle(&mut self, mut vehicle: VehicleRecord) -> Result<Option<VehicleId>> {
        if vehicle.id.is_assigned() && self.vehicles.contains_key(&vehicle.id) {
            debug!(id = %vehicle.id, "insert ignored, id already exists");
            return Ok(None);
        }
        if !vehicle.id.is_assigned() {
            vehicle.id = self.next_id();
        }

        let id = vehicle.id;
        let mut next = self.vehicles.clone();
        next.insert(id, vehicle);
        self.commit(next)?;
        self.publish();
        debug!(id = %id, "vehicle inserted");
        Ok(Some(id))
    }

    /// Remove a vehicle by ID
    pub fn remove_vehicle(&mut self, id: VehicleId) -> Result<bool> {
        if !self.vehicles.contains_key(&id) {
            return Ok(false);
        }
        let mut next = self.vehicles.clone();
        next.remove(&id);
        self.commit(next)?;
        self.publish();
        debug!(id = %id, "vehicle deleted");
        Ok(true)
    }

    /// Update a vehicle
    pub fn update_vehicle(&mut self, vehicle: VehicleRecord) -> Result<bool> {
        if !self.vehicles.contains_key(&vehicle.id) {
            return Ok(false);
        }
        let id = vehicle.id;
        let mut next = self.vehicles.clone();
        next.insert(id, vehicle);
        self.commit(next)?;
        self.publish();
        debug!(id = %id, "vehicle updated");
        Ok(true)
    }

    /// Get a vehicle by ID
    pub fn get_vehicle(&self, id: VehicleId) -> Option<&VehicleRecord> {
        self.vehicles.get(&id)
    }

    /// Get all vehicles ordered by id
    pub fn all_vehicles(&self) -> Vec<&VehicleRecord> {
        self.vehicles.values().collect()
    }

    /// Get total vehicle count
    pub fn count(&self) -> usize {
        self.vehicles.len()
    }

    /// Subscribe to list changes
    pub fn subscribe(&self) -> watch::Receiver<Vec<VehicleRecord>> {
        self.notifier.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_ids_assigned_sequentially_and_persisted() {
        let dir = tempdir().unwrap();
        let mut store = VehicleStore::open(dir.path().to_path_buf()).unwrap();

        let a = store.add_vehicle(VehicleRecord::new("Fiat", "Panda", 2019)).unwrap();
        let b = store.add_vehicle(VehicleRecord::new("Ford", "Focus", 2021)).unwrap();
        assert_eq!(a, Some(VehicleId(1)));
        assert_eq!(b, Some(VehicleId(2)));

        let reopened = VehicleStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.count(), 2);
        assert_eq!(reopened.get_vehicle(VehicleId(2)).unwrap().model, "Focus");
    }

    #[test]
    fn test_insert_with_existing_id_is_ignored() {
        let dir = tempdir().unwrap();
        let mut store = VehicleStore::open(dir.path().to_path_buf()).unwrap();
        store.add_vehicle(VehicleRecord::new("Fiat", "Panda", 2019)).unwrap();

        let dup = VehicleRecord::new("Other", "Car", 2000).with_id(VehicleId(1));
        assert_eq!(store.add_vehicle(dup).unwrap(), None);
        assert_eq!(store.get_vehicle(VehicleId(1)).unwrap().brand, "Fiat");
    }

    #[test]
    fn test_update_and_remove() {
        let dir = tempdir().unwrap();
        let mut store = VehicleStore::open(dir.path().to_path_buf()).unwrap();
        let id = store
            .add_vehicle(VehicleRecord::new("Fiat", "Panda", 2019))
            .unwrap()
            .unwrap();

        let edited = store
            .get_vehicle(id)
            .cloned()
            .unwrap()
            .with_insurance_paid_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(store.update_vehicle(edited).unwrap());
        assert!(store.get_vehicle(id).unwrap().insurance_paid_date.is_some());

        let unknown = VehicleRecord::new("X", "Y", 1).with_id(VehicleId(99));
        assert!(!store.update_vehicle(unknown).unwrap());

        assert!(store.remove_vehicle(id).unwrap());
        assert!(!store.remove_vehicle(id).unwrap());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_subscribers_see_every_mutation() {
        let dir = tempdir().unwrap();
        let mut store = VehicleStore::open(dir.path().to_path_buf()).unwrap();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.add_vehicle(VehicleRecord::new("Fiat", "Panda", 2019)).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        store.remove_vehicle(VehicleId(1)).unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let dir = tempdir().unwrap();
        let mut store = VehicleStore::open(dir.path().to_path_buf()).unwrap();
        let id = store
            .add_vehicle(VehicleRecord::new("Fiat", "Panda", 2019))
            .unwrap()
            .unwrap();
        let rx = store.subscribe();

        // a directory in place of the file makes every write fail
        std::fs::remove_file(dir.path().join("vehicles.json")).unwrap();
        std::fs::create_dir(dir.path().join("vehicles.json")).unwrap();

        assert!(store.add_vehicle(VehicleRecord::new("Ford", "Focus", 2021)).is_err());
        let mut edited = store.get_vehicle(id).cloned().unwrap();
        edited.year = 2020;
        assert!(store.update_vehicle(edited).is_err());
        assert!(store.remove_vehicle(id).is_err());

        assert_eq!(store.count(), 1);
        assert_eq!(store.get_vehicle(id).unwrap().year, 2019);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_corrupted_file_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("vehicles.json"), "{not json").unwrap();
        assert!(VehicleStore::open(dir.path().to_path_buf()).is_err());
    }
}

//! Change-notification handles over the vehicle list

use drivesafe_types::{VehicleId, VehicleRecord};
use tokio::sync::watch;

/// Receives the full, id-ordered record list after every store mutation
#[derive(Debug, Clone)]
pub struct VehicleListWatch {
    rx: watch::Receiver<Vec<VehicleRecord>>,
}

impl VehicleListWatch {
    pub fn new(rx: watch::Receiver<Vec<VehicleRecord>>) -> Self {
        Self { rx }
    }

    /// Latest list; marks it as seen
    pub fn current(&mut self) -> Vec<VehicleRecord> {
        self.rx.borrow_and_update().clone()
    }

    /// Whether a list newer than the last `current()` was published
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the next change. `None` once the store is dropped.
    pub async fn changed(&mut self) -> Option<Vec<VehicleRecord>> {
        self.rx.changed().await.ok()?;
        Some(self.current())
    }
}

/// Follows one record; yields `None` while it does not exist
#[derive(Debug, Clone)]
pub struct VehicleWatch {
    id: VehicleId,
    inner: VehicleListWatch,
}

impl VehicleWatch {
    pub fn new(id: VehicleId, inner: VehicleListWatch) -> Self {
        Self { id, inner }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn current(&mut self) -> Option<VehicleRecord> {
        let id = self.id;
        self.inner.current().into_iter().find(|r| r.id == id)
    }

    pub fn has_changed(&self) -> bool {
        self.inner.has_changed()
    }

    /// Wait for the next store change. Outer `None` once the store is dropped.
    pub async fn changed(&mut self) -> Option<Option<VehicleRecord>> {
        let id = self.id;
        let list = self.inner.changed().await?;
        Some(list.into_iter().find(|r| r.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_watch_follows_single_record() {
        let (tx, rx) = watch::channel(Vec::new());
        let mut watch = VehicleWatch::new(VehicleId(2), VehicleListWatch::new(rx));
        assert!(watch.current().is_none());
        assert!(!watch.has_changed());

        tx.send_replace(vec![
            VehicleRecord::new("Fiat", "Panda", 2019).with_id(VehicleId(1)),
            VehicleRecord::new("Ford", "Focus", 2021).with_id(VehicleId(2)),
        ]);
        assert!(watch.has_changed());
        assert_eq!(watch.current().map(|r| r.model), Some("Focus".to_string()));
        assert!(!watch.has_changed());
    }

    #[tokio::test]
    async fn test_list_watch_changed_yields_new_list() {
        let (tx, rx) = watch::channel(Vec::new());
        let mut list = VehicleListWatch::new(rx);

        let record = VehicleRecord::new("Fiat", "Panda", 2019).with_id(VehicleId(1));
        tx.send_replace(vec![record.clone()]);
        assert_eq!(list.changed().await, Some(vec![record]));

        drop(tx);
        assert_eq!(list.changed().await, None);
    }

    #[tokio::test]
    async fn test_vehicle_watch_changed_follows_update_and_delete() {
        let (tx, rx) = watch::channel(Vec::new());
        let mut watch = VehicleWatch::new(VehicleId(1), VehicleListWatch::new(rx));

        let record = VehicleRecord::new("Fiat", "Panda", 2019).with_id(VehicleId(1));
        tx.send_replace(vec![record.clone()]);
        assert_eq!(watch.changed().await.flatten().map(|r| r.year), Some(2019));

        let mut edited = record;
        edited.year = 2020;
        tx.send_replace(vec![edited]);
        assert_eq!(watch.changed().await.flatten().map(|r| r.year), Some(2020));

        tx.send_replace(Vec::new());
        assert_eq!(watch.changed().await, Some(None));

        drop(tx);
        assert_eq!(watch.changed().await, None);
    }
}

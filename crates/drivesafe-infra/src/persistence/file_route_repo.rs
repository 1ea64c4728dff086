//! File-based implementation of RouteRepository

use std::path::PathBuf;
use std::sync::Mutex;

use drivesafe_domain::repository::RouteRepository;
use drivesafe_store::DocumentStore;
use drivesafe_types::{Error, Result, Route};
use tracing::info;

use super::lock;

/// Route collection backed by `routes.json`
pub struct FileRouteRepository {
    store: Mutex<DocumentStore<Route>>,
}

impl FileRouteRepository {
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        Ok(Self {
            store: Mutex::new(DocumentStore::open(store_dir, "routes")?),
        })
    }

    fn newest_first(mut routes: Vec<Route>) -> Vec<Route> {
        routes.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        routes
    }
}

impl RouteRepository for FileRouteRepository {
    fn add(&self, route: &Route) -> std::result::Result<(), Error> {
        lock(&self.store)?.set(route.clone())?;
        info!(
            id = %route.id,
            user = %route.user_id,
            points = route.path_points.len(),
            distance_m = route.total_distance_m,
            "route saved"
        );
        Ok(())
    }

    fn get(&self, id: &str) -> std::result::Result<Option<Route>, Error> {
        Ok(lock(&self.store)?.get(id).cloned())
    }

    fn find_by_user(&self, user_id: &str) -> std::result::Result<Vec<Route>, Error> {
        let routes = lock(&self.store)?
            .all()
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        Ok(Self::newest_first(routes))
    }

    fn find_all(&self) -> std::result::Result<Vec<Route>, Error> {
        let routes = lock(&self.store)?.all().into_iter().cloned().collect();
        Ok(Self::newest_first(routes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use drivesafe_types::GeoPoint;
    use tempfile::tempdir;

    fn route(id: &str, user: &str, recorded_at: NaiveDateTime) -> Route {
        Route {
            id: id.to_string(),
            user_id: user.to_string(),
            recorded_at,
            path_points: vec![GeoPoint::new(45.0, 9.0)],
            start_time: recorded_at,
            end_time: recorded_at,
            total_distance_m: 0.0,
            average_speed_mps: 0.0,
            max_speed_mps: 0.0,
        }
    }

    #[test]
    fn test_find_by_user_newest_first() {
        let dir = tempdir().unwrap();
        let repo = FileRouteRepository::open(dir.path().to_path_buf()).unwrap();
        let t0 = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        repo.add(&route("a", "u1", t0)).unwrap();
        repo.add(&route("b", "u1", t0 + Duration::hours(2))).unwrap();
        repo.add(&route("c", "u2", t0 + Duration::hours(1))).unwrap();

        let mine: Vec<String> = repo
            .find_by_user("u1")
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(mine, vec!["b", "a"]);
        assert_eq!(repo.find_all().unwrap().len(), 3);
        assert_eq!(repo.get("c").unwrap().unwrap().user_id, "u2");
        assert!(repo.get("zzz").unwrap().is_none());
    }
}

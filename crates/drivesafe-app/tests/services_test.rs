//! Service-level tests against real file stores and a fixed clock

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use drivesafe_app::app::{analyze_performance, GarageService, GarageServiceError, ProfileService, RouteService};
use drivesafe_app::repository::{open_profile_repo_at, open_route_repo_at, open_vehicle_repo_at};
use drivesafe_domain::model::{Countdown, ExpirationStatus, TrackSample};
use drivesafe_domain::service::{ExpirationCalculator, ValidationError};
use drivesafe_domain::{Clock, FixedClock};
use drivesafe_infra::persistence::FileVehicleRepository;
use drivesafe_types::{Error, VehicleId};
use tempfile::{tempdir, TempDir};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(today().and_hms_opt(14, 30, 0).unwrap()))
}

fn garage() -> (TempDir, GarageService<FileVehicleRepository>) {
    let dir = tempdir().unwrap();
    let repo = open_vehicle_repo_at(dir.path().to_path_buf()).unwrap();
    (dir, GarageService::new(repo, clock(), ExpirationCalculator::default()))
}

#[test]
fn test_add_requires_brand_and_model() {
    let (_dir, garage) = garage();
    assert!(matches!(
        garage.add_vehicle("  ", "Panda", 2019),
        Err(GarageServiceError::InvalidInput(_))
    ));
    let id = garage.add_vehicle(" Fiat ", "Panda", 2019).unwrap();
    assert_eq!(id, VehicleId(1));
    assert_eq!(garage.get(id).unwrap().brand, "Fiat");
}

#[test]
fn test_valid_edit_end_to_end() {
    let (_dir, garage) = garage();
    let id = garage.add_vehicle("Fiat", "Panda", 2019).unwrap();

    let record = garage
        .get(id)
        .unwrap()
        .with_next_inspection(today() + Duration::days(35), Some(10_000))
        .with_tax(Some(150.0), None);
    garage.save_edit(&record).unwrap();

    let detail = garage.detail(id).unwrap();
    assert_eq!(detail.inspection.status, ExpirationStatus::Future);
    assert_eq!(
        detail.inspection.countdown,
        Countdown::MonthsAndDays { months: 1, days: 5 }
    );
    assert_eq!(detail.inspection.days_left, Some(35));
    assert_eq!(detail.insurance.status, ExpirationStatus::Unknown);
    assert_eq!(detail.tax.countdown, Countdown::None);
    assert!(!detail.needs_attention());
}

#[test]
fn test_invalid_edit_is_not_persisted() {
    let (_dir, garage) = garage();
    let id = garage.add_vehicle("Fiat", "Panda", 2019).unwrap();

    let record = garage
        .get(id)
        .unwrap()
        .with_next_inspection(today() - Duration::days(1), Some(10_000));
    let err = garage.save_edit(&record).unwrap_err();
    assert!(matches!(
        err,
        GarageServiceError::Invalid(ValidationError::InspectionDateInPast)
    ));
    assert!(garage.get(id).unwrap().next_inspection_date.is_none());
}

#[test]
fn test_insurance_status_derived_from_paid_date() {
    let (_dir, garage) = garage();
    let id = garage.add_vehicle("Ford", "Focus", 2021).unwrap();

    // paid 2023-06-20 -> expires 2024-06-20, five days from today
    let record = garage
        .get(id)
        .unwrap()
        .with_insurance_paid_date(NaiveDate::from_ymd_opt(2023, 6, 20).unwrap());
    garage.save_edit(&record).unwrap();

    let detail = garage.detail(id).unwrap();
    assert_eq!(detail.insurance.date, NaiveDate::from_ymd_opt(2024, 6, 20));
    assert_eq!(detail.insurance.status, ExpirationStatus::Near);
    assert_eq!(detail.insurance.countdown, Countdown::Days { days: 5 });
    assert!(detail.needs_attention());
}

#[test]
fn test_edit_and_remove_unknown_vehicle() {
    let (_dir, garage) = garage();
    let ghost = drivesafe_types::VehicleRecord::new("Ghost", "Car", 2000).with_id(VehicleId(7));
    assert!(matches!(
        garage.save_edit(&ghost),
        Err(GarageServiceError::NotFound(VehicleId(7)))
    ));
    assert!(matches!(
        garage.remove(VehicleId(7)),
        Err(GarageServiceError::NotFound(_))
    ));
}

#[test]
fn test_watch_sees_saved_edit() {
    let (_dir, garage) = garage();
    let id = garage.add_vehicle("Fiat", "Panda", 2019).unwrap();
    let mut watch = garage.watch(id);
    assert!(watch.current().is_some());

    let record = garage
        .get(id)
        .unwrap()
        .with_tax(Some(120.0), Some(today()));
    garage.save_edit(&record).unwrap();

    assert!(watch.has_changed());
    let detail = garage.detail_of(watch.current().unwrap());
    assert_eq!(detail.tax.status, ExpirationStatus::Today);
    assert_eq!(detail.tax.countdown, Countdown::DueToday);
}

#[test]
fn test_overview_uses_configured_threshold() {
    let dir = tempdir().unwrap();
    let repo = open_vehicle_repo_at(dir.path().to_path_buf()).unwrap();
    let garage = GarageService::new(repo, clock(), ExpirationCalculator::new(7));
    let id = garage.add_vehicle("Fiat", "Panda", 2019).unwrap();
    let record = garage.get(id).unwrap().with_tax(None, Some(today() + Duration::days(10)));
    garage.save_edit(&record).unwrap();

    let overview = garage.overview().unwrap();
    assert_eq!(overview.len(), 1);
    assert_eq!(overview[0].tax.status, ExpirationStatus::Future);
}

#[test]
fn test_profile_created_once_and_uid_checked() {
    let dir = tempdir().unwrap();
    let repo = open_profile_repo_at(dir.path().to_path_buf()).unwrap();
    let profiles = ProfileService::new(repo, clock());

    let created = profiles.fetch_or_create("u1", "u1@example.com").unwrap();
    assert_eq!(created.email, "u1@example.com");
    assert!(created.licenses.is_empty());

    let mut edited = created.clone();
    edited.username = "mario".to_string();
    edited.licenses = vec!["be".to_string(), "B".to_string(), "A1".to_string()];
    let saved = profiles.save("u1", &edited).unwrap();
    assert_eq!(saved.licenses, vec!["A1", "B", "BE"]);

    let again = profiles.fetch_or_create("u1", "other@example.com").unwrap();
    assert_eq!(again.username, "mario");
    assert_eq!(again.email, "u1@example.com");

    assert!(matches!(profiles.save("u2", &edited), Err(Error::InvalidInput(_))));
    edited.licenses = vec!["Q".to_string()];
    assert!(matches!(profiles.save("u1", &edited), Err(Error::InvalidInput(_))));
}

#[test]
fn test_route_recorded_and_listed() {
    let dir = tempdir().unwrap();
    let repo = open_route_repo_at(dir.path().to_path_buf()).unwrap();
    let routes = RouteService::new(repo, clock());

    let t0 = today().and_hms_opt(8, 0, 0).unwrap();
    let samples = vec![
        TrackSample::new(t0, 45.0, 9.0, Some(0.0)),
        TrackSample::new(t0 + Duration::seconds(60), 45.009, 9.0, Some(20.0)),
    ];
    let route = routes.record_from_samples("u1", &samples).unwrap();
    assert_eq!(route.duration_seconds(), 60);
    assert_eq!(route.max_speed_kmh(), 72);

    assert_eq!(routes.get(&route.id).unwrap(), route);
    assert_eq!(routes.list(Some("u1")).unwrap().len(), 1);
    assert!(routes.list(Some("u2")).unwrap().is_empty());
    assert!(matches!(routes.get("missing"), Err(Error::NotFound(_))));
    assert!(matches!(
        routes.record_from_samples("u1", &[]),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn test_analyze_performance_skips_samples_without_speed() {
    let t0 = today().and_hms_opt(8, 0, 0).unwrap();
    let samples = vec![
        TrackSample::new(t0, 45.0, 9.0, Some(10.0)),
        TrackSample::new(t0, 45.0, 9.0, None),
        TrackSample::new(t0, 45.0, 9.0, Some(5.0)),
    ];
    let snap = analyze_performance(&samples, 3.0);
    assert_eq!(snap.samples, 2);
    assert_eq!(snap.acceleration_events, 1);
    assert_eq!(snap.braking_events, 1);
    assert_eq!(snap.max_kmh, 36);
}

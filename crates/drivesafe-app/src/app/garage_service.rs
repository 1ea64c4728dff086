//! Garage Service - vehicle records and their obligation deadlines
//!
//! Wraps the vehicle repository with the two rules that matter to the user:
//! edits are validated against the clock before they are written, and every
//! read of a vehicle comes back with freshly derived statuses and countdowns.

use std::sync::Arc;

use chrono::NaiveDate;
use drivesafe_domain::model::{Countdown, ExpirationStatus};
use drivesafe_domain::repository::{VehicleRepository, VehicleWatch};
use drivesafe_domain::service::{days_until, validate_record, ExpirationCalculator, ValidationError};
use drivesafe_domain::Clock;
use drivesafe_types::{Error, VehicleId, VehicleRecord};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors specific to the garage service
#[derive(Debug, Error)]
pub enum GarageServiceError {
    #[error("Invalid vehicle data: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Vehicle {0} not found")]
    NotFound(VehicleId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] Error),
}

impl From<GarageServiceError> for Error {
    fn from(err: GarageServiceError) -> Self {
        match err {
            GarageServiceError::Store(e) => e,
            GarageServiceError::NotFound(id) => Error::NotFound(format!("vehicle {}", id)),
            GarageServiceError::Invalid(e) => Error::InvalidInput(e.to_string()),
            GarageServiceError::InvalidInput(msg) => Error::InvalidInput(msg),
        }
    }
}

/// One obligation as shown on the detail screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObligationView {
    /// Date the obligation expires
    pub date: Option<NaiveDate>,
    pub status: ExpirationStatus,
    pub countdown: Countdown,
    pub days_left: Option<i64>,
}

impl ObligationView {
    fn derive(date: Option<NaiveDate>, today: NaiveDate, calculator: &ExpirationCalculator) -> Self {
        Self {
            date,
            status: calculator.classify(date, today),
            countdown: calculator.countdown(date, today),
            days_left: date.map(|d| days_until(&d, &today)),
        }
    }
}

/// A vehicle with its derived obligation state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleDetail {
    pub record: VehicleRecord,
    pub today: NaiveDate,
    pub insurance: ObligationView,
    pub inspection: ObligationView,
    pub tax: ObligationView,
}

impl VehicleDetail {
    pub fn derive(record: VehicleRecord, today: NaiveDate, calculator: &ExpirationCalculator) -> Self {
        let insurance_expiration = calculator.insurance_expiration(record.insurance_paid_date);
        Self {
            insurance: ObligationView::derive(insurance_expiration, today, calculator),
            inspection: ObligationView::derive(record.next_inspection_date, today, calculator),
            tax: ObligationView::derive(record.tax_expiration_date, today, calculator),
            record,
            today,
        }
    }

    pub fn obligations(&self) -> [(&'static str, &ObligationView); 3] {
        [
            ("Insurance", &self.insurance),
            ("Inspection", &self.inspection),
            ("Road tax", &self.tax),
        ]
    }

    pub fn needs_attention(&self) -> bool {
        self.obligations()
            .iter()
            .any(|(_, view)| view.status.needs_attention())
    }
}

pub struct GarageService<R: VehicleRepository> {
    repo: R,
    clock: Arc<dyn Clock>,
    calculator: ExpirationCalculator,
}

impl<R: VehicleRepository> GarageService<R> {
    pub fn new(repo: R, clock: Arc<dyn Clock>, calculator: ExpirationCalculator) -> Self {
        Self {
            repo,
            clock,
            calculator,
        }
    }

    /// Register a vehicle with no obligations set
    pub fn add_vehicle(&self, brand: &str, model: &str, year: i32) -> Result<VehicleId, GarageServiceError> {
        let brand = brand.trim();
        let model = model.trim();
        if brand.is_empty() || model.is_empty() {
            return Err(GarageServiceError::InvalidInput(
                "brand and model must not be empty".to_string(),
            ));
        }

        let record = VehicleRecord::new(brand, model, year);
        debug!(brand, model, year, "adding vehicle");
        let id = self.repo.create(&record)?.ok_or_else(|| {
            GarageServiceError::InvalidInput("vehicle id already in use".to_string())
        })?;
        info!(id = %id, "vehicle added");
        Ok(id)
    }

    /// All vehicles in ascending id order
    pub fn list(&self) -> Result<Vec<VehicleRecord>, GarageServiceError> {
        Ok(self.repo.find_all()?)
    }

    /// All vehicles with derived obligation state
    pub fn overview(&self) -> Result<Vec<VehicleDetail>, GarageServiceError> {
        let today = self.clock.today();
        Ok(self
            .repo
            .find_all()?
            .into_iter()
            .map(|record| VehicleDetail::derive(record, today, &self.calculator))
            .collect())
    }

    pub fn get(&self, id: VehicleId) -> Result<VehicleRecord, GarageServiceError> {
        self.repo
            .find_by_id(id)?
            .ok_or(GarageServiceError::NotFound(id))
    }

    pub fn detail(&self, id: VehicleId) -> Result<VehicleDetail, GarageServiceError> {
        let record = self.get(id)?;
        Ok(self.detail_of(record))
    }

    /// Derive the detail view for a record snapshot, e.g. one yielded by [`Self::watch`]
    pub fn detail_of(&self, record: VehicleRecord) -> VehicleDetail {
        VehicleDetail::derive(record, self.clock.today(), &self.calculator)
    }

    /// Validate an edited record and persist it
    pub fn save_edit(&self, record: &VehicleRecord) -> Result<(), GarageServiceError> {
        validate_record(record, self.clock.now())?;
        if !self.repo.update(record)? {
            return Err(GarageServiceError::NotFound(record.id));
        }
        info!(id = %record.id, "vehicle saved");
        Ok(())
    }

    pub fn remove(&self, id: VehicleId) -> Result<(), GarageServiceError> {
        if !self.repo.delete(id)? {
            return Err(GarageServiceError::NotFound(id));
        }
        info!(id = %id, "vehicle removed");
        Ok(())
    }

    /// Follow changes to one vehicle
    pub fn watch(&self, id: VehicleId) -> VehicleWatch {
        self.repo.watch_by_id(id)
    }
}

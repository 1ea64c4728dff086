//! Business rules checked before an edited vehicle record is persisted

use drivesafe_types::VehicleRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::CalendarDay;

/// Why an edited record was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Next inspection date is in the past")]
    InspectionDateInPast,

    #[error("Odometer reading at inspection must not be negative")]
    OdometerMustBeNonNegative,

    #[error("Tax cost must be positive")]
    TaxCostMustBePositive,
}

/// Check a record against the edit rules; the first failing rule wins.
///
/// Rules, in order: next inspection not before today, odometer >= 0,
/// finite tax cost > 0. Absent fields are never an error.
pub fn validate_record<N: CalendarDay>(record: &VehicleRecord, now: N) -> Result<(), ValidationError> {
    if let Some(inspection) = record.next_inspection_date {
        if inspection.calendar_day() < now.calendar_day() {
            return Err(ValidationError::InspectionDateInPast);
        }
    }

    if let Some(odometer) = record.odometer_at_inspection {
        if odometer < 0 {
            return Err(ValidationError::OdometerMustBeNonNegative);
        }
    }

    if let Some(cost) = record.tax_cost {
        // NaN and infinity fail too; neither survives a JSON round-trip
        if !(cost.is_finite() && cost > 0.0) {
            return Err(ValidationError::TaxCostMustBePositive);
        }
    }

    Ok(())
}

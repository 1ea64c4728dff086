//! Shared entities persisted by the stores

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Conversion factor from m/s to km/h
pub const MPS_TO_KMH: f64 = 3.6;

/// Convert a speed in m/s to whole km/h, truncating toward zero
pub fn mps_to_kmh(speed_mps: f64) -> i64 {
    (speed_mps * MPS_TO_KMH) as i64
}

/// Identity of a vehicle record. `0` means "not yet assigned by the store".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub i64);

impl VehicleId {
    pub const UNASSIGNED: VehicleId = VehicleId(0);

    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for VehicleId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(VehicleId)
    }
}

/// A vehicle in the user's garage with its maintenance obligations.
///
/// Obligation dates are calendar days; they carry no time-of-day component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    #[serde(default)]
    pub id: VehicleId,
    pub brand: String,
    pub model: String,
    pub year: i32,
    /// Day the insurance premium was paid; coverage runs one calendar year
    #[serde(default)]
    pub insurance_paid_date: Option<NaiveDate>,
    #[serde(default)]
    pub next_inspection_date: Option<NaiveDate>,
    /// Odometer reading (km) at the last inspection
    #[serde(default)]
    pub odometer_at_inspection: Option<i32>,
    #[serde(default)]
    pub registration_date: Option<NaiveDate>,
    #[serde(default)]
    pub tax_cost: Option<f64>,
    #[serde(default)]
    pub tax_expiration_date: Option<NaiveDate>,
}

impl VehicleRecord {
    pub fn new(brand: impl Into<String>, model: impl Into<String>, year: i32) -> Self {
        Self {
            id: VehicleId::UNASSIGNED,
            brand: brand.into(),
            model: model.into(),
            year,
            insurance_paid_date: None,
            next_inspection_date: None,
            odometer_at_inspection: None,
            registration_date: None,
            tax_cost: None,
            tax_expiration_date: None,
        }
    }

    pub fn with_id(mut self, id: VehicleId) -> Self {
        self.id = id;
        self
    }

    pub fn with_insurance_paid_date(mut self, date: NaiveDate) -> Self {
        self.insurance_paid_date = Some(date);
        self
    }

    pub fn with_next_inspection(mut self, date: NaiveDate, odometer: Option<i32>) -> Self {
        self.next_inspection_date = Some(date);
        self.odometer_at_inspection = odometer;
        self
    }

    pub fn with_tax(mut self, cost: Option<f64>, expiration: Option<NaiveDate>) -> Self {
        self.tax_cost = cost;
        self.tax_expiration_date = expiration;
        self
    }

    /// "Brand Model (Year)"
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.year)
    }
}

/// A WGS84 coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A recorded driving route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Document id (UUID v4)
    pub id: String,
    pub user_id: String,
    /// When the route was saved
    pub recorded_at: NaiveDateTime,
    #[serde(default)]
    pub path_points: Vec<GeoPoint>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Meters
    pub total_distance_m: f64,
    /// m/s
    pub average_speed_mps: f64,
    /// m/s
    pub max_speed_mps: f64,
}

impl Route {
    pub fn duration_seconds(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }

    pub fn average_speed_kmh(&self) -> i64 {
        mps_to_kmh(self.average_speed_mps)
    }

    pub fn max_speed_kmh(&self) -> i64 {
        mps_to_kmh(self.max_speed_mps)
    }
}

/// A user's profile document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub favorite_car_brand: String,
    #[serde(default)]
    pub place_of_birth: String,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub city_of_residence: String,
    #[serde(default)]
    pub year_of_birth: Option<i32>,
    /// License subcategory codes held (e.g. "B", "A1", "BE")
    #[serde(default)]
    pub licenses: Vec<String>,
    pub registered_at: NaiveDateTime,
}

impl UserProfile {
    /// A blank profile for a newly authenticated user
    pub fn blank(uid: impl Into<String>, email: impl Into<String>, registered_at: NaiveDateTime) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            username: String::new(),
            favorite_car_brand: String::new(),
            place_of_birth: String::new(),
            street_address: String::new(),
            city_of_residence: String::new(),
            year_of_birth: None,
            licenses: Vec::new(),
            registered_at,
        }
    }
}

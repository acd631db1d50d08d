use serde::{Deserialize, Serialize};

/// Session payload returned by both the login and the register endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: Option<i64>,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Opaque session token, held for the process lifetime only
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    /// Chilean mobile number in `+569XXXXXXXX` form
    pub phone: String,
}

/// A registered vehicle as returned by a store.
///
/// The three expiration dates are kept as the text the user entered
/// (`dd/MM/yyyy`, or `yyyy-MM-dd` for data coming from other systems).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: i32,
    /// Licence plate, unique within a user's vehicles
    pub plate: String,
    /// Odometer reading in kilometres
    pub km: i64,
    /// Mandatory insurance (SOAP) expiration date
    pub soap_date: String,
    #[serde(rename = "permisoCirculacionDate")]
    pub permit_date: String,
    #[serde(rename = "revisionTecnicaDate")]
    pub inspection_date: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    pub km: i64,
    pub soap_date: String,
    #[serde(rename = "permisoCirculacionDate")]
    pub permit_date: String,
    #[serde(rename = "revisionTecnicaDate")]
    pub inspection_date: String,
    pub user_id: i64,
}

impl Vehicle {
    /// Build the stored representation of a request once a store has assigned an id
    pub fn from_request(id: i64, request: &VehicleRequest) -> Self {
        Self {
            id,
            brand: request.brand.clone(),
            model: request.model.clone(),
            year: request.year,
            plate: request.plate.clone(),
            km: request.km,
            soap_date: request.soap_date.clone(),
            permit_date: request.permit_date.clone(),
            inspection_date: request.inspection_date.clone(),
            user_id: request.user_id,
        }
    }
}

/// A service performed on a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: i64,
    pub vehicle_id: i64,
    pub vehicle_plate: String,
    /// Label in `"<category> - <subtype>"` form
    #[serde(rename = "type")]
    pub service_type: String,
    pub date: String,
    /// Odometer reading when the service was performed
    pub km: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub cost: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub vehicle_id: i64,
    pub vehicle_plate: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub date: String,
    pub km: i64,
    pub notes: Option<String>,
    pub cost: Option<i64>,
}

impl MaintenanceRecord {
    pub fn from_request(id: i64, request: &MaintenanceRequest) -> Self {
        Self {
            id,
            vehicle_id: request.vehicle_id,
            vehicle_plate: request.vehicle_plate.clone(),
            service_type: request.service_type.clone(),
            date: request.date.clone(),
            km: request.km,
            notes: request.notes.clone(),
            cost: request.cost,
        }
    }
}

/// A running cost attached to a vehicle (fuel, tolls, parking...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: i64,
    pub vehicle_id: i64,
    pub vehicle_plate: String,
    pub category: String,
    /// Subtype within the category, e.g. "Bencina 95" under "Combustible"
    #[serde(rename = "type")]
    pub expense_type: String,
    pub date: String,
    /// Whole Chilean pesos
    pub amount: i64,
    #[serde(default)]
    pub km: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequest {
    pub vehicle_id: i64,
    pub vehicle_plate: String,
    pub category: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub date: String,
    pub amount: i64,
    pub km: Option<i64>,
    pub notes: Option<String>,
}

impl ExpenseRecord {
    pub fn from_request(id: i64, request: &ExpenseRequest) -> Self {
        Self {
            id,
            vehicle_id: request.vehicle_id,
            vehicle_plate: request.vehicle_plate.clone(),
            category: request.category.clone(),
            expense_type: request.expense_type.clone(),
            date: request.date.clone(),
            amount: request.amount,
            km: request.km,
            notes: request.notes.clone(),
        }
    }
}

/// A persisted expiration reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: i64,
    pub title: String,
    pub message: String,
    /// Generation date in `dd/MM/yyyy`
    pub date: String,
    /// Identity of the triggering condition (`plate:field:date`).
    /// Manually added alerts have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// An alert that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAlert {
    pub title: String,
    pub message: String,
    pub date: String,
    pub key: Option<String>,
}

impl AlertRecord {
    pub fn from_new(id: i64, alert: &NewAlert) -> Self {
        Self {
            id,
            title: alert.title.clone(),
            message: alert.message.clone(),
            date: alert.date.clone(),
            key: alert.key.clone(),
        }
    }
}

/// Outcome of an ordered form validation: the first failing rule's message,
/// or valid with an empty message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormCheck {
    pub is_valid: bool,
    pub message: String,
}

impl FormCheck {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

/// Spending and service activity for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub total_spent: i64,
    pub expense_count: usize,
    pub maintenance_count: usize,
}

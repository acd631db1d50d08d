//! Expiration alerts.
//!
//! Each vehicle carries three expiration dates: mandatory insurance (SOAP),
//! circulation permit and technical inspection. A date that falls inside the
//! alert horizon produces one alert for that field.

use chrono::NaiveDateTime;
use shared::{NewAlert, Vehicle};

use super::dates::{self, NEVER};

/// Default inclusive horizon, in days
pub const DEFAULT_HORIZON_DAYS: i64 = 15;

/// The expiration dates tracked for every vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpiryField {
    Soap,
    CirculationPermit,
    TechnicalInspection,
}

impl ExpiryField {
    pub const ALL: [ExpiryField; 3] = [
        ExpiryField::Soap,
        ExpiryField::CirculationPermit,
        ExpiryField::TechnicalInspection,
    ];

    /// Fixed alert title for this field
    pub fn title(self) -> &'static str {
        match self {
            ExpiryField::Soap => "SOAP por vencer",
            ExpiryField::CirculationPermit => "Permiso de circulación por vencer",
            ExpiryField::TechnicalInspection => "Revisión técnica por vencer",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ExpiryField::Soap => "El SOAP",
            ExpiryField::CirculationPermit => "El permiso de circulación",
            ExpiryField::TechnicalInspection => "La revisión técnica",
        }
    }

    fn key_part(self) -> &'static str {
        match self {
            ExpiryField::Soap => "soap",
            ExpiryField::CirculationPermit => "permit",
            ExpiryField::TechnicalInspection => "inspection",
        }
    }

    pub fn date_of(self, vehicle: &Vehicle) -> &str {
        match self {
            ExpiryField::Soap => &vehicle.soap_date,
            ExpiryField::CirculationPermit => &vehicle.permit_date,
            ExpiryField::TechnicalInspection => &vehicle.inspection_date,
        }
    }
}

/// When a date produces an alert, and whether repeated conditions are suppressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertPolicy {
    /// Inclusive upper bound on days-until
    pub horizon_days: i64,
    /// Also alert on dates that have already passed
    pub include_expired: bool,
    /// Skip alerts whose key is already present in the alert list
    pub deduplicate: bool,
}

impl AlertPolicy {
    /// `0 <= days <= 15`, duplicates appended on every evaluation
    pub const fn legacy() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            include_expired: false,
            deduplicate: false,
        }
    }

    pub fn triggers(&self, days_until: i64) -> bool {
        if days_until == NEVER {
            return false;
        }
        (self.include_expired || days_until >= 0) && days_until <= self.horizon_days
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            deduplicate: true,
            ..Self::legacy()
        }
    }
}

/// Identity of an alert condition: plate, field and the triggering date.
/// The date is written in display form whichever accepted format it came in.
pub fn alert_key(plate: &str, field: ExpiryField, date: &str) -> String {
    let date = match dates::parse_date(date) {
        Some(parsed) => dates::format_display_date(parsed),
        None => date.trim().to_string(),
    };
    format!("{}:{}:{}", plate, field.key_part(), date)
}

/// Alerts due for a vehicle at `now`, one per triggering field, in
/// SOAP / permit / inspection order. Generation date is `now`'s day.
pub fn evaluate_vehicle(vehicle: &Vehicle, now: NaiveDateTime, policy: &AlertPolicy) -> Vec<NewAlert> {
    let generated_on = dates::format_display_date(now.date());

    ExpiryField::ALL
        .iter()
        .filter_map(|&field| {
            let date = field.date_of(vehicle);
            if !policy.triggers(dates::days_until(date, now)) {
                return None;
            }

            Some(NewAlert {
                title: field.title().to_string(),
                message: format!("{} del vehículo {} vence el {}", field.label(), vehicle.plate, date.trim()),
                date: generated_on.clone(),
                key: Some(alert_key(&vehicle.plate, field, date)),
            })
        })
        .collect()
}

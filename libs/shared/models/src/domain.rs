use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// CORE ENTITIES
// ==============================================================================

/// Patient record. `dni` is the natural unique key: re-booking with a known
/// DNI refreshes the contact fields instead of opening a second record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub dni: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Treatment catalog entry. Services are soft-disabled via `is_active` and
/// never deleted, so historical appointments keep a valid reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub duration_minutes: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub service_id: String,
    /// Absolute instant, normalized to UTC at write time.
    pub appointment_date: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Linear lifecycle: an appointment is created `pending`, confirmed at
    /// most once by a verified payment, and can be cancelled while not yet
    /// terminal. `completed`/`cancelled` accept no further transitions.
    pub fn valid_transitions(&self) -> Vec<AppointmentStatus> {
        match self {
            AppointmentStatus::Pending => vec![
                AppointmentStatus::Confirmed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Confirmed => vec![
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Completed => vec![],
            AppointmentStatus::Cancelled => vec![],
        }
    }

    pub fn can_transition_to(&self, next: &AppointmentStatus) -> bool {
        self.valid_transitions().contains(next)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_confirms_at_most_once() {
        assert!(AppointmentStatus::Pending.can_transition_to(&AppointmentStatus::Confirmed));
        assert!(!AppointmentStatus::Confirmed.can_transition_to(&AppointmentStatus::Confirmed));
        assert!(!AppointmentStatus::Cancelled.can_transition_to(&AppointmentStatus::Confirmed));
    }

    #[test]
    fn terminal_states_accept_no_transitions() {
        assert!(AppointmentStatus::Completed.valid_transitions().is_empty());
        assert!(AppointmentStatus::Cancelled.valid_transitions().is_empty());
    }

    #[test]
    fn status_serializes_to_storage_strings() {
        assert_eq!(
            serde_json::to_value(AppointmentStatus::Pending).unwrap(),
            serde_json::json!("pending")
        );
        assert_eq!(
            serde_json::to_value(AppointmentStatus::Confirmed).unwrap(),
            serde_json::json!("confirmed")
        );
    }
}

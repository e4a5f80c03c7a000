use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::domain::AppointmentStatus;

// ==============================================================================
// PUBLIC SURFACE (camelCase, the contract the booking form speaks)
// ==============================================================================

/// Booking form payload. Fields default to empty so that missing values reach
/// the handler's own validation instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub dni: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub appointment_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub appointment_id: Uuid,
    pub checkout_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQueryParams {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub service_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub available_slots: Vec<String>,
}

// ==============================================================================
// STORAGE ROWS
// ==============================================================================

/// Row shape of the occupancy query: appointment start joined with the
/// booked service's duration.
#[derive(Debug, Deserialize)]
pub struct OccupiedAppointmentRow {
    pub appointment_date: DateTime<Utc>,
    pub services: ServiceDurationRow,
}

#[derive(Debug, Deserialize)]
pub struct ServiceDurationRow {
    pub duration_minutes: i64,
}

/// Time range blocked by an existing appointment, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupiedInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

// ==============================================================================
// ADMIN AGENDA
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct AgendaJoinRow {
    pub id: Uuid,
    pub appointment_date: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub service_id: String,
    pub patients: AgendaPatientRow,
}

#[derive(Debug, Deserialize)]
pub struct AgendaPatientRow {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub dni: String,
}

/// Flat row the dashboard table consumes.
#[derive(Debug, Serialize)]
pub struct AgendaEntry {
    pub id: Uuid,
    pub appointment_date: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub service_id: String,
    pub patient_name: String,
    pub patient_phone: String,
    pub patient_email: String,
    pub patient_dni: String,
}

impl From<AgendaJoinRow> for AgendaEntry {
    fn from(row: AgendaJoinRow) -> Self {
        Self {
            id: row.id,
            appointment_date: row.appointment_date,
            status: row.status,
            service_id: row.service_id,
            patient_name: row.patients.full_name,
            patient_phone: row.patients.phone,
            patient_email: row.patients.email,
            patient_dni: row.patients.dni,
        }
    }
}

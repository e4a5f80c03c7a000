use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::domain::{Appointment, AppointmentStatus, Patient};
use shared_models::error::AppError;

use crate::models::{AgendaEntry, AgendaJoinRow, CreateBookingRequest};

/// Reservation writer: upserts the patient by DNI and creates the `pending`
/// appointment. This service is the only writer of new appointment rows; the
/// webhook path owns the `pending -> confirmed` transition.
pub struct BookingService {
    supabase: SupabaseClient,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Step A of the booking flow. Two writes, one logical unit: if the
    /// appointment insert fails after the patient upsert succeeded, the
    /// refreshed patient record is harmless and is left in place; the caller
    /// sees a failure and no appointment id.
    pub async fn create_pending_booking(
        &self,
        request: &CreateBookingRequest,
        appointment_date: DateTime<Utc>,
    ) -> Result<Uuid, AppError> {
        if request.full_name.is_empty()
            || request.phone.is_empty()
            || request.dni.is_empty()
            || request.email.is_empty()
            || request.service_id.is_empty()
        {
            return Err(AppError::InvalidInput(
                "Faltan datos obligatorios para agendar el turno.".to_string(),
            ));
        }

        let patient_id = self.upsert_patient(request).await?;
        debug!("Patient {} upserted for DNI booking", patient_id);

        let appointment = self
            .insert_pending_appointment(patient_id, request, appointment_date)
            .await?;

        info!(
            "Appointment {} reserved (pending) for patient {}",
            appointment.id, patient_id
        );
        Ok(appointment.id)
    }

    /// Insert-or-update keyed on the DNI column. Concurrent bookings with the
    /// same DNI both land on the single existing row; contact fields take the
    /// latest submission.
    async fn upsert_patient(&self, request: &CreateBookingRequest) -> Result<Uuid, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Prefer",
            HeaderValue::from_static("resolution=merge-duplicates,return=representation"),
        );

        let patient_data = json!({
            "dni": request.dni,
            "full_name": request.full_name,
            "phone": request.phone,
            "email": request.email
        });

        let result: Vec<Patient> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/patients?on_conflict=dni",
                Some(patient_data),
                Some(headers),
            )
            .await
            .map_err(|e| {
                warn!("Patient upsert failed: {}", e);
                AppError::Unavailable("No pudimos registrar tus datos.".to_string())
            })?;

        result
            .into_iter()
            .next()
            .map(|patient| patient.id)
            .ok_or_else(|| AppError::Internal("No se pudo registrar el paciente.".to_string()))
    }

    async fn insert_pending_appointment(
        &self,
        patient_id: Uuid,
        request: &CreateBookingRequest,
        appointment_date: DateTime<Utc>,
    ) -> Result<Appointment, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let appointment_data = json!({
            "patient_id": patient_id,
            "service_id": request.service_id,
            "appointment_date": appointment_date.to_rfc3339(),
            "status": AppointmentStatus::Pending.to_string(),
            "notes": request.notes
        });

        let result: Vec<Appointment> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments",
                Some(appointment_data),
                Some(headers),
            )
            .await
            .map_err(|e| {
                warn!("Appointment insert failed: {}", e);
                AppError::Unavailable("No pudimos agendar el turno.".to_string())
            })?;

        result
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Internal("No se pudo crear el turno.".to_string()))
    }

    /// Dashboard agenda: appointments joined with patient contact data,
    /// newest first.
    pub async fn list_agenda(&self) -> Result<Vec<AgendaEntry>, AppError> {
        let path = "/rest/v1/appointments?select=id,appointment_date,status,service_id,patients(full_name,phone,email,dni)&order=appointment_date.desc";

        let rows: Vec<AgendaJoinRow> = self
            .supabase
            .request(Method::GET, path, None)
            .await
            .map_err(|e| {
                warn!("Agenda listing failed: {}", e);
                AppError::Unavailable("No se pudieron extraer los registros.".to_string())
            })?;

        Ok(rows.into_iter().map(AgendaEntry::from).collect())
    }
}

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use notification_cell::mailer::Mailer;
use notification_cell::templates::{format_appointment_date_es, BookingEmailData};
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::domain::{Appointment, AppointmentStatus};
use shared_models::error::AppError;

use crate::models::WebhookOutcome;
use crate::services::checkout::MercadoPagoClient;

#[derive(Debug, Deserialize)]
struct ConfirmedAppointmentRow {
    appointment_date: DateTime<Utc>,
    patients: PatientContactRow,
    services: ServiceNameRow,
}

#[derive(Debug, Deserialize)]
struct PatientContactRow {
    full_name: String,
    email: String,
    phone: String,
}

#[derive(Debug, Deserialize)]
struct ServiceNameRow {
    name: String,
}

/// Webhook-driven confirmation: the only path that moves an appointment from
/// `pending` to `confirmed`, and only after re-querying the provider for the
/// payment's authoritative status.
pub struct PaymentWebhookService {
    supabase: SupabaseClient,
    mercadopago: MercadoPagoClient,
    mailer: Mailer,
}

impl PaymentWebhookService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            mercadopago: MercadoPagoClient::new(config),
            mailer: Mailer::new(config),
        }
    }

    /// Process one notification delivery. Redelivery-safe: the confirm write
    /// is a compare-and-set on `status=pending`, so a repeated approved
    /// notification is acknowledged without touching the row or re-sending
    /// the confirmation email.
    pub async fn handle_notification(&self, payload: Value) -> Result<WebhookOutcome, AppError> {
        // The provider sends many event kinds; only payment events proceed.
        // Depending on the API version the kind arrives as `type` or `topic`.
        let is_payment_event = payload["type"] == "payment" || payload["topic"] == "payment";
        if !is_payment_event {
            debug!("Ignoring non-payment webhook event");
            return Ok(WebhookOutcome::Ignored);
        }

        let payment_id = extract_payment_id(&payload).ok_or_else(|| {
            warn!("Payment webhook without a payment id");
            AppError::InvalidInput("Falta el ID del pago.".to_string())
        })?;

        // Never trust the payload's own status field: ask the provider.
        let payment = self
            .mercadopago
            .get_payment(&payment_id)
            .await
            .map_err(|e| {
                warn!("Could not verify payment {}: {}", payment_id, e);
                AppError::VerificationFailed("No se pudo validar el pago.".to_string())
            })?;

        if !payment.is_approved() {
            info!(
                "Payment {} in state {}, skipping confirmation",
                payment_id, payment.status
            );
            return Ok(WebhookOutcome::NotApproved(payment.status));
        }

        let appointment_id = match payment.external_reference {
            Some(ref id) if !id.is_empty() => id.clone(),
            _ => {
                warn!(
                    "Approved payment {} carries no external reference, nothing to confirm",
                    payment_id
                );
                return Ok(WebhookOutcome::Unlinked);
            }
        };

        let confirmed = self.confirm_if_pending(&appointment_id).await?;
        if !confirmed {
            info!(
                "Appointment {} not pending (redelivery or unknown id), acknowledging",
                appointment_id
            );
            return Ok(WebhookOutcome::AlreadyConfirmed);
        }

        info!("Appointment {} confirmed", appointment_id);

        // Best-effort: the payment is real and confirmed regardless of email
        // deliverability.
        if let Err(e) = self.send_confirmation_email(&appointment_id).await {
            warn!(
                "Confirmation email for appointment {} failed: {}",
                appointment_id, e
            );
        }

        Ok(WebhookOutcome::Confirmed)
    }

    /// Guarded `pending -> confirmed` transition. Filtering the update on the
    /// current status makes the write idempotent: a row that is already
    /// confirmed (or does not exist) matches nothing and returns empty.
    async fn confirm_if_pending(&self, appointment_id: &str) -> Result<bool, AppError> {
        let path = format!(
            "/rest/v1/appointments?id=eq.{}&status=eq.{}",
            appointment_id,
            AppointmentStatus::Pending
        );

        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let updated: Vec<Appointment> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(json!({ "status": AppointmentStatus::Confirmed.to_string() })),
                Some(headers),
            )
            .await
            .map_err(|e| {
                warn!("Storage unavailable during confirmation: {}", e);
                AppError::Unavailable("No se pudo actualizar el turno.".to_string())
            })?;

        Ok(!updated.is_empty())
    }

    async fn send_confirmation_email(&self, appointment_id: &str) -> anyhow::Result<()> {
        let path = format!(
            "/rest/v1/appointments?id=eq.{}&select=appointment_date,patients(full_name,email,phone),services(name)",
            appointment_id
        );

        let rows: Vec<ConfirmedAppointmentRow> =
            self.supabase.request(Method::GET, &path, None).await?;

        let Some(row) = rows.into_iter().next() else {
            anyhow::bail!("confirmed appointment {} not found for email join", appointment_id);
        };

        let data = BookingEmailData {
            full_name: row.patients.full_name.clone(),
            service_name: row.services.name,
            formatted_date: format_appointment_date_es(row.appointment_date),
            phone: row.patients.phone,
        };

        self.mailer
            .send_booking_confirmation(&row.patients.email, &data)
            .await
    }
}

/// The payment id lives at `data.id` on current webhooks and at the top-level
/// `id` on legacy IPN notifications, as a string or a number.
fn extract_payment_id(payload: &Value) -> Option<String> {
    let candidate = payload
        .pointer("/data/id")
        .or_else(|| payload.get("id"))?;

    match candidate {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

use std::sync::Arc;
use std::sync::OnceLock;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use regex::Regex;
use serde_json::{json, Value};
use tracing::{error, warn};

use notification_cell::mailer::Mailer;
use notification_cell::templates::{format_appointment_date_es, BookingEmailData};
use payment_cell::models::CheckoutRequest;
use payment_cell::services::checkout::MercadoPagoClient;
use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{
    AvailabilityQueryParams, AvailabilityResponse, BookingResponse, CreateBookingRequest,
};
use crate::services::availability::AvailabilityService;
use crate::services::booking::BookingService;
use crate::services::catalog::CatalogService;

fn dni_regex() -> &'static Regex {
    static DNI_RE: OnceLock<Regex> = OnceLock::new();
    DNI_RE.get_or_init(|| Regex::new(r"^\d{7,9}$").unwrap())
}

// ==============================================================================
// PUBLIC BOOKING HANDLERS
// ==============================================================================

/// Treatment catalog for the booking form.
#[axum::debug_handler]
pub async fn get_services(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let services = CatalogService::new(&state).list_active_services().await?;
    Ok(Json(json!(services)))
}

/// Free slots for one day and one treatment. A fully booked day is a valid
/// empty list, not an error.
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<AppConfig>>,
    Query(params): Query<AvailabilityQueryParams>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let (Some(date), Some(service_id)) = (params.date, params.service_id) else {
        return Err(AppError::InvalidInput(
            "Faltan parámetros de fecha o servicio.".to_string(),
        ));
    };

    let available_slots = AvailabilityService::new(&state)
        .get_available_slots(date, &service_id)
        .await?;

    Ok(Json(AvailabilityResponse { available_slots }))
}

/// Booking creation: reserve a pending appointment, then request the payment
/// link. A failed checkout does not roll the reservation back; it is reported
/// distinctly so the caller can retry the payment without re-booking.
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let missing_fields = request.full_name.is_empty()
        || request.phone.is_empty()
        || request.dni.is_empty()
        || request.email.is_empty()
        || request.service_id.is_empty();

    let appointment_date = match request.appointment_date {
        Some(date) if !missing_fields => date,
        _ => {
            return Err(AppError::InvalidInput(
                "Faltan datos obligatorios para agendar el turno.".to_string(),
            ))
        }
    };

    if !dni_regex().is_match(&request.dni) {
        return Err(AppError::InvalidInput(
            "El DNI debe tener entre 7 y 9 dígitos.".to_string(),
        ));
    }

    let service = CatalogService::new(&state)
        .get_active_service(&request.service_id)
        .await?;

    let appointment_id = BookingService::new(&state)
        .create_pending_booking(&request, appointment_date)
        .await?;

    // Reservation-received email goes out once the row exists, whatever the
    // gateway does next. Failures are logged and swallowed.
    let email_data = BookingEmailData {
        full_name: request.full_name.clone(),
        service_name: service.name.clone(),
        formatted_date: format_appointment_date_es(appointment_date),
        phone: request.phone.clone(),
    };
    if let Err(e) = Mailer::new(&state)
        .send_booking_received(&request.email, &email_data)
        .await
    {
        warn!("Reservation email for appointment {} failed: {}", appointment_id, e);
    }

    let checkout_url = MercadoPagoClient::new(&state)
        .create_checkout(&CheckoutRequest {
            appointment_id,
            payer_name: request.full_name.clone(),
            payer_email: request.email.clone(),
            service_name: service.name,
        })
        .await
        .map_err(|e| {
            error!("Checkout creation for appointment {} failed: {}", appointment_id, e);
            AppError::PaymentGateway(
                "No pudimos generar el enlace de pago. Tu reserva sigue activa, intentá nuevamente."
                    .to_string(),
            )
        })?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            success: true,
            message: "Turno procesado correctamente".to_string(),
            appointment_id,
            checkout_url,
        }),
    ))
}

// ==============================================================================
// ADMIN HANDLERS
// ==============================================================================

/// Agenda for the dashboard. The session gate runs as router middleware.
#[axum::debug_handler]
pub async fn admin_list_appointments(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let agenda = BookingService::new(&state).list_agenda().await?;
    Ok(Json(json!(agenda)))
}

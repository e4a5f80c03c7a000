use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::error;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::WebhookOutcome;
use crate::services::webhook::PaymentWebhookService;

/// Inbound payment notifications. The provider retries on 5xx and stops on
/// 2xx, so every handled outcome acknowledges; only verification-infra
/// failures bubble up as errors.
///
/// The body is read raw: the provider is not strict about content-type
/// headers, so the payload is parsed by hand rather than through the `Json`
/// extractor.
#[axum::debug_handler]
pub async fn mercadopago_webhook(
    State(state): State<Arc<AppConfig>>,
    body: String,
) -> Result<Json<Value>, AppError> {
    let payload: Value = serde_json::from_str(&body).map_err(|e| {
        error!("Unparseable webhook body: {}", e);
        AppError::InvalidInput("Invalid JSON".to_string())
    })?;

    let service = PaymentWebhookService::new(&state);
    let outcome = service.handle_notification(payload).await?;

    let response = match outcome {
        WebhookOutcome::Ignored => json!({
            "success": true,
            "message": "Evento ignorado (no es un pago)"
        }),
        WebhookOutcome::NotApproved(status) => json!({
            "success": true,
            "status": status
        }),
        WebhookOutcome::Unlinked => json!({ "success": true }),
        WebhookOutcome::AlreadyConfirmed => json!({
            "success": true,
            "message": "Turno ya confirmado"
        }),
        WebhookOutcome::Confirmed => json!({
            "success": true,
            "message": "Webhook procesado correctamente"
        }),
    };

    Ok(Json(response))
}

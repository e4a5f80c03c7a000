use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-wide error taxonomy. Messages are the user-facing text that
/// handlers return verbatim; internal diagnostics belong in tracing, not here.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage or an upstream collaborator is unreachable. Transient, the
    /// caller may retry.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// Checkout creation failed. The appointment row already exists as a
    /// `pending` reservation and must not be rolled back, so this is surfaced
    /// distinctly from booking failure.
    #[error("Payment gateway error: {0}")]
    PaymentGateway(String),

    /// The webhook could not confirm the payment's truth with the provider.
    /// Mapped to a 5xx so the provider redelivers the notification.
    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::PaymentGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::VerificationFailed(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        tracing::error!("Error: {}: {}", status, message);

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use shared_config::AppConfig;
use shared_models::error::AppError;

/// Gate for the admin surface. The dashboard authenticates once elsewhere and
/// carries an opaque session token; this middleware only compares it against
/// the configured value.
pub async fn admin_session_middleware(
    State(config): State<Arc<AppConfig>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::Auth("Sesión requerida.".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Auth("Sesión inválida.".to_string()))?;

    let token = auth_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Auth("Sesión inválida.".to_string()))?;

    // An unset token must fail closed rather than matching the empty string.
    if config.admin_session_token.is_empty() || token != config.admin_session_token {
        return Err(AppError::Auth("Sesión inválida.".to_string()));
    }

    Ok(next.run(request).await)
}

use std::sync::Arc;

use axum::{routing::post, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn webhook_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/mercadopago", post(handlers::mercadopago_webhook))
        .with_state(state)
}

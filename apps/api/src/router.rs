use std::sync::Arc;

use axum::{routing::get, Router};

use booking_cell::router::{admin_routes, booking_routes};
use payment_cell::router::webhook_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Zoe Turnos API is running!" }))
        .nest("/turnos", booking_routes(state.clone()))
        .nest("/admin", admin_routes(state.clone()))
        .nest("/webhooks", webhook_routes(state))
}

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::admin_session_middleware;

use crate::handlers;

pub fn booking_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/servicios", get(handlers::get_services))
        .route("/disponibilidad", get(handlers::get_availability))
        .route("/", post(handlers::create_booking))
        .with_state(state)
}

pub fn admin_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/turnos", get(handlers::admin_list_appointments))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_session_middleware,
        ));

    Router::new().merge(protected_routes).with_state(state)
}

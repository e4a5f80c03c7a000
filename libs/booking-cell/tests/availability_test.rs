use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_cell::router::booking_routes;
use shared_config::AppConfig;
use shared_utils::test_utils::TestConfig;

fn create_test_app(config: AppConfig) -> Router {
    booking_routes(Arc::new(config))
}

async fn config_with_storage(mock_server: &MockServer) -> AppConfig {
    let mut config = TestConfig::default().to_app_config();
    config.supabase_url = mock_server.uri();
    config
}

fn service_row(id: &str, name: &str, duration_minutes: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "duration_minutes": duration_minutes,
        "is_active": true
    })
}

async fn get_slots(app: Router, date: &str, service_id: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(format!("/disponibilidad?date={}&serviceId={}", date, service_id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn empty_weekday_yields_full_slot_grid() {
    let mock_server = MockServer::start().await;
    let config = config_with_storage(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .and(query_param("id", "eq.srv_1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([service_row("srv_1", "Limpieza Facial", 30)])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    // 2030-03-04 is a Monday far in the future, so the lead-time rule is moot.
    let (status, body) = get_slots(create_test_app(config), "2030-03-04", "srv_1").await;

    assert_eq!(status, StatusCode::OK);
    let slots = body["availableSlots"].as_array().unwrap();
    assert_eq!(slots.len(), 18);
    assert_eq!(slots.first().unwrap(), "10:00");
    assert_eq!(slots.last().unwrap(), "18:30");
}

#[tokio::test]
async fn saturday_with_noon_block_starts_at_one_pm() {
    let mock_server = MockServer::start().await;
    let config = config_with_storage(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([service_row("srv_2", "Blefaroplastia", 60)])),
        )
        .mount(&mock_server)
        .await;

    // 12:00-13:00 clinic time on Saturday 2030-03-09 is 15:00Z.
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "appointment_date": "2030-03-09T15:00:00+00:00",
            "services": { "duration_minutes": 60 }
        }])))
        .mount(&mock_server)
        .await;

    let (status, body) = get_slots(create_test_app(config), "2030-03-09", "srv_2").await;

    assert_eq!(status, StatusCode::OK);
    let slots = body["availableSlots"].as_array().unwrap();
    assert_eq!(slots.first().unwrap(), "13:00");
    assert!(!slots.iter().any(|s| s == "12:00" || s == "12:30"));
}

#[tokio::test]
async fn sunday_short_circuits_before_occupancy_lookup() {
    let mock_server = MockServer::start().await;
    let config = config_with_storage(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([service_row("srv_1", "Peeling", 30)])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    // 2030-03-03 is a Sunday.
    let (status, body) = get_slots(create_test_app(config), "2030-03-03", "srv_1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["availableSlots"], json!([]));
}

#[tokio::test]
async fn unknown_service_is_not_found() {
    let mock_server = MockServer::start().await;
    let config = config_with_storage(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let (status, body) = get_slots(create_test_app(config), "2030-03-04", "ghost").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Servicio no encontrado.");
}

#[tokio::test]
async fn storage_outage_surfaces_as_unavailable() {
    let mock_server = MockServer::start().await;
    let config = config_with_storage(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&mock_server)
        .await;

    let (status, _) = get_slots(create_test_app(config), "2030-03-04", "srv_1").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn missing_parameters_are_rejected() {
    let mock_server = MockServer::start().await;
    let config = config_with_storage(&mock_server).await;
    let app = create_test_app(config);

    let request = Request::builder()
        .method("GET")
        .uri("/disponibilidad?date=2030-03-04")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

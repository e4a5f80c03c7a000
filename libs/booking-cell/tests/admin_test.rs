use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_cell::router::admin_routes;
use shared_utils::test_utils::{TestConfig, TEST_ADMIN_TOKEN};

async fn admin_app(mock_server: &MockServer) -> Router {
    let mut config = TestConfig::default().to_app_config();
    config.supabase_url = mock_server.uri();
    admin_routes(Arc::new(config))
}

fn agenda_request(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/turnos");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn agenda_requires_a_session_token() {
    let mock_server = MockServer::start().await;
    let app = admin_app(&mock_server).await;

    let response = app.oneshot(agenda_request(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn agenda_rejects_a_wrong_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = admin_app(&mock_server).await;
    let response = app
        .oneshot(agenda_request(Some("not-the-token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn agenda_returns_joined_rows_newest_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "b51a3a52-27ab-4a3c-8a0f-6a2a9d1de111",
                "appointment_date": "2030-03-04T17:00:00+00:00",
                "status": "confirmed",
                "service_id": "srv_1",
                "patients": {
                    "full_name": "Ana Pérez",
                    "phone": "1144556677",
                    "email": "ana@example.com",
                    "dni": "12345678"
                }
            },
            {
                "id": "c62b4b63-38bc-4b4d-9b1a-7b3b0e2ef222",
                "appointment_date": "2030-03-02T14:00:00+00:00",
                "status": "pending",
                "service_id": "srv_2",
                "patients": {
                    "full_name": "Juan Gómez",
                    "phone": "1133445566",
                    "email": "juan@example.com",
                    "dni": "23456789"
                }
            }
        ])))
        .mount(&mock_server)
        .await;

    let app = admin_app(&mock_server).await;
    let response = app
        .oneshot(agenda_request(Some(TEST_ADMIN_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let rows = body.as_array().unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["patient_name"], "Ana Pérez");
    assert_eq!(rows[0]["status"], "confirmed");
    assert_eq!(rows[1]["patient_dni"], "23456789");
}

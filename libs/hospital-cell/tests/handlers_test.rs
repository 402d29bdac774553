use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::{MemoryStorage, StorageBackend};
use hospital_cell::router::hospital_routes;
use hospital_cell::state::{ACCESS_TOKEN_KEY, USERNAME_KEY};
use hospital_cell::HospitalState;
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

fn app(backend_uri: &str) -> (Router, Arc<HospitalState>, Arc<dyn StorageBackend>) {
    let storage: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());
    let state = Arc::new(HospitalState::new(
        TestConfig::with_backend(backend_uri).to_arc(),
        storage.clone(),
    ));
    (hospital_routes(state.clone()), state, storage)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn mount_login(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/hospital/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockBackendResponses::hospital_login_response("hosp-1", "citycare")),
        )
        .mount(mock_server)
        .await;
}

async fn login(app: &Router) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            json!({"email": "admin@citycare.in", "password": "H0spital#1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_records_token_and_username() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;
    let (app, state, storage) = app(&mock_server.uri());

    login(&app).await;

    assert!(state.session.is_authenticated().await);
    assert_eq!(
        storage.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(),
        Some("access-token-xyz")
    );
    assert_eq!(
        storage.get(USERNAME_KEY).await.unwrap().as_deref(),
        Some("citycare")
    );
    assert_eq!(
        storage.get("isHospitalAuthenticated").await.unwrap().as_deref(),
        Some("true")
    );
}

#[tokio::test]
async fn test_login_without_token_drops_previous_extras() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/hospital/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "data": {"_id": "hosp-2", "name": "Sunrise Clinic"}
        })))
        .mount(&mock_server)
        .await;
    let (app, state, storage) = app(&mock_server.uri());
    state.session.replace_extra(ACCESS_TOKEN_KEY, Some("stale-token")).await.unwrap();
    state.session.replace_extra(USERNAME_KEY, Some("citycare")).await.unwrap();

    login(&app).await;

    assert_eq!(storage.get(ACCESS_TOKEN_KEY).await.unwrap(), None);
    assert_eq!(storage.get(USERNAME_KEY).await.unwrap(), None);
    assert_eq!(
        state.session.current().await.unwrap().name,
        "Sunrise Clinic"
    );
}

#[tokio::test]
async fn test_update_profile_uses_stored_token() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;
    Mock::given(method("PUT"))
        .and(path("/api/hospitals/hosp-1"))
        .and(header("authorization", "Bearer access-token-xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;
    let (app, state, _storage) = app(&mock_server.uri());
    login(&app).await;

    let response = app
        .oneshot(json_request("PUT", "/profile", json!({"name": "City Care Multispeciality"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["data"]["name"], "City Care Multispeciality");
    assert_eq!(
        state.session.current().await.unwrap().name,
        "City Care Multispeciality"
    );
}

#[tokio::test]
async fn test_profile_requires_session() {
    let (app, _state, _storage) = app("http://127.0.0.1:9");

    let response = app
        .oneshot(json_request("PUT", "/profile", json!({"name": "X"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_everything_even_when_backend_fails() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/hospital/logout/citycare"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    let (app, state, storage) = app(&mock_server.uri());
    login(&app).await;

    let response = app
        .oneshot(Request::builder().method("POST").uri("/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!state.session.is_authenticated().await);
    assert_eq!(storage.get(ACCESS_TOKEN_KEY).await.unwrap(), None);
    assert_eq!(storage.get("hospitalData").await.unwrap(), None);
}

#[tokio::test]
async fn test_get_hospital_passes_through_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hospitals/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Hospital not found"})))
        .mount(&mock_server)
        .await;
    let (app, _state, _storage) = app(&mock_server.uri());

    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Hospital not found");
}

use assert_matches::assert_matches;
use reqwest::Method;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_backend::{BackendClient, BackendError};
use shared_utils::test_utils::TestConfig;

async fn client_for(server: &MockServer) -> BackendClient {
    BackendClient::new(&TestConfig::with_backend(&server.uri()).to_app_config())
}

#[tokio::test]
async fn test_json_request_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hospitals/h-1"))
        .and(header("Authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "City Hospital"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let body: Value = client
        .request(Method::GET, "/api/hospitals/h-1", Some("token-123"), None)
        .await
        .unwrap();

    assert_eq!(body["name"], "City Hospital");
}

#[tokio::test]
async fn test_form_request_is_urlencoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/hospital/login"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("email=admin%40city.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let body: Value = client
        .request_form(
            Method::POST,
            "/api/v1/hospital/login",
            &[("email", "admin@city.org"), ("password", "pw")],
        )
        .await
        .unwrap();

    assert_eq!(body["message"], "ok");
}

#[tokio::test]
async fn test_error_status_carries_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/doctor/signup"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "Username already taken"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result: Result<Value, _> = client
        .request(Method::POST, "/api/v1/doctor/signup", None, Some(json!({})))
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.banner("Failed to register doctor"), "Username already taken");
}

#[tokio::test]
async fn test_empty_success_body_decodes_as_null() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/hospital/logout/city"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let body: Value = client
        .request(Method::PATCH, "/api/v1/hospital/logout/city", None, Some(json!({})))
        .await
        .unwrap();

    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = BackendClient::new(&TestConfig::with_backend("http://127.0.0.1:9").to_app_config());
    let result: Result<Value, _> = client.request(Method::GET, "/", None, None).await;

    let err = result.unwrap_err();
    assert_matches!(err, BackendError::Transport(_));
    assert_eq!(err.banner("Failed to retrieve hospital"), "Failed to retrieve hospital");
}

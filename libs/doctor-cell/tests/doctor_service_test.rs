use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::error::DoctorError;
use doctor_cell::models::*;
use doctor_cell::services::DoctorService;
use shared_models::{AppError, LoginCredentials};
use shared_utils::image::encode_data_url;
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

mod common;
use common::valid_registration;

fn signed_in_profile() -> DoctorProfile {
    serde_json::from_value(MockBackendResponses::doctor_record("doc-1", "asharao")).unwrap()
}

#[tokio::test]
async fn test_register_posts_camel_case_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/doctor/signup"))
        .and(body_partial_json(json!({
            "username": "asharao",
            "licenseNumber": "KMC-44821",
            "locationsOfDoctor": [{"addressline1": "12 MG Road"}],
            "timeSlots": [{"dayName": "Monday"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Doctor registered successfully",
            "data": {"_id": "doc-1"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend(&mock_server.uri()).to_app_config();
    let service = DoctorService::new(&config);

    let response = service.register(&valid_registration()).await.unwrap();
    assert!(response.success);
    assert_eq!(response.message, "Doctor registered successfully");
}

#[tokio::test]
async fn test_register_rejects_invalid_form_without_calling_backend() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend(&mock_server.uri()).to_app_config();
    let service = DoctorService::new(&config);

    let mut registration = valid_registration();
    registration.time_slots[0].slots[0].max_patients_in_the_slot = 0;

    let err = service.register(&registration).await.unwrap_err();
    assert_matches!(err, DoctorError::Validation(fields) if fields.contains("timeSlots.0.slots.0.maxPatientsInTheSlot"));
}

#[tokio::test]
async fn test_register_surfaces_backend_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/doctor/signup"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(MockBackendResponses::error_response("Username already taken")),
        )
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend(&mock_server.uri()).to_app_config();
    let service = DoctorService::new(&config);

    let err = service.register(&valid_registration()).await.unwrap_err();
    assert_eq!(err.to_string(), "Username already taken");
    assert_matches!(AppError::from(err), AppError::Backend(msg) if msg == "Username already taken");
}

#[tokio::test]
async fn test_login_parses_profile() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/doctor/login"))
        .and(body_partial_json(json!({"email": "asha@caresetu.in", "rememberMe": true})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockBackendResponses::doctor_login_response("doc-1", "asharao")),
        )
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend(&mock_server.uri()).to_app_config();
    let service = DoctorService::new(&config);

    let response = service
        .login(&LoginCredentials {
            email: "asha@caresetu.in".into(),
            password: "Str0ng!pass".into(),
            remember_me: true,
        })
        .await
        .unwrap();

    assert_eq!(response.message, "Doctor logged in successfully");
    let profile = response.data.unwrap();
    assert_eq!(profile.id.as_deref(), Some("doc-1"));
    assert_eq!(profile.refresh_token.as_deref(), Some("refresh-token-123"));
    assert_eq!(profile.time_slots[0].slots[0].max_patients_in_the_slot, 6);
}

#[tokio::test]
async fn test_login_failure_maps_to_auth_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/doctor/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend(&mock_server.uri()).to_app_config();
    let service = DoctorService::new(&config);

    let err = service
        .login(&LoginCredentials {
            email: "asha@caresetu.in".into(),
            password: "Wr0ng!pass".into(),
            remember_me: false,
        })
        .await
        .unwrap_err();

    assert_matches!(AppError::from(err), AppError::Auth(msg) if msg == "Invalid credentials");
}

#[tokio::test]
async fn test_update_profile_sends_bearer_refresh_token() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/doctor/update-profile/doc-1"))
        .and(header("authorization", "Bearer refresh-token-123"))
        .and(body_partial_json(json!({"name": "Dr. Asha R."})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Profile updated"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend(&mock_server.uri()).to_app_config();
    let service = DoctorService::new(&config);
    let profile = signed_in_profile();

    let mut update = ProfileUpdate::from(&profile);
    update.name = "Dr. Asha R.".into();

    let response = service.update_profile(&profile, &update).await.unwrap();
    assert_eq!(response.message, "Profile updated");
}

#[tokio::test]
async fn test_update_profile_requires_refresh_token() {
    let config = TestConfig::default().to_app_config();
    let service = DoctorService::new(&config);

    let mut profile = signed_in_profile();
    profile.refresh_token = None;
    let update = ProfileUpdate::from(&profile);

    let err = service.update_profile(&profile, &update).await.unwrap_err();
    assert_matches!(err, DoctorError::MissingCredential("refresh token"));
}

#[tokio::test]
async fn test_update_avatar_uses_returned_url() {
    let mock_server = MockServer::start().await;
    let data_url = encode_data_url(b"\x89PNG\r\n", "image/png");

    Mock::given(method("PATCH"))
        .and(path("/api/v1/doctor/update-avatar/doc-1"))
        .and(body_partial_json(json!({"doctorImage": data_url.clone()})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"doctorAvatarURL": "https://cdn.caresetu.in/doc-1.png"}
        })))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend(&mock_server.uri()).to_app_config();
    let service = DoctorService::new(&config);

    let url = service
        .update_avatar(&signed_in_profile(), &data_url)
        .await
        .unwrap();
    assert_eq!(url, "https://cdn.caresetu.in/doc-1.png");
}

#[tokio::test]
async fn test_update_avatar_rejects_non_data_url() {
    let config = TestConfig::default().to_app_config();
    let service = DoctorService::new(&config);

    let err = service
        .update_avatar(&signed_in_profile(), "https://example.com/a.png")
        .await
        .unwrap_err();
    assert_matches!(err, DoctorError::Image(_));
}

#[tokio::test]
async fn test_logout_not_found_is_client_side_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/doctor/logout/asharao"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<pre>Error: Cannot PATCH<br></pre>"))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend(&mock_server.uri()).to_app_config();
    let service = DoctorService::new(&config);

    let response = service.logout("asharao").await.unwrap();
    assert!(response.success);
    assert!(response.message.contains("client-side"));
}

#[tokio::test]
async fn test_logout_server_error_propagates() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/doctor/logout/asharao"))
        .respond_with(ResponseTemplate::new(500).set_body_string(""))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend(&mock_server.uri()).to_app_config();
    let service = DoctorService::new(&config);

    let err = service.logout("asharao").await.unwrap_err();
    assert_eq!(err.to_string(), "Logout failed");
}

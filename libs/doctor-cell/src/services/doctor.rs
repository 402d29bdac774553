use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use shared_backend::BackendClient;
use shared_config::AppConfig;
use shared_models::{ApiResponse, LoginCredentials};
use shared_utils::image::decode_data_url;

use crate::error::DoctorError;
use crate::models::{DoctorProfile, DoctorRegistration, ProfileUpdate};
use crate::services::validation::{validate_profile_update, validate_registration};

const SIGNUP_PATH: &str = "/api/v1/doctor/signup";
const LOGIN_PATH: &str = "/api/v1/doctor/login";

/// Backend calls for the doctor portal. Each call is sent once; failures
/// carry a single banner message and never touch local state.
pub struct DoctorService {
    backend: BackendClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    pub async fn register(&self, registration: &DoctorRegistration) -> Result<ApiResponse, DoctorError> {
        validate_registration(registration)?;

        debug!(
            "Registering doctor {} with {} schedule day(s)",
            registration.username,
            registration.time_slots.len()
        );

        let payload = serde_json::to_value(registration)
            .map_err(|e| DoctorError::backend(e.into(), "Registration failed"))?;

        let result: Value = self
            .backend
            .request(Method::POST, SIGNUP_PATH, None, Some(payload))
            .await
            .map_err(|e| DoctorError::backend(e, "Registration failed"))?;

        info!("Doctor {} registered", registration.username);
        let message = response_message(&result, "Registration successful");
        Ok(ApiResponse::ok(message, result))
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<ApiResponse<DoctorProfile>, DoctorError> {
        debug!("Doctor login attempt for {}", credentials.email);

        let payload = json!({
            "email": credentials.email,
            "password": credentials.password,
            "rememberMe": credentials.remember_me,
        });

        let result: Value = self
            .backend
            .request(Method::POST, LOGIN_PATH, None, Some(payload))
            .await
            .map_err(|e| DoctorError::backend(e, "Login failed"))?;

        let profile = match result.get("data") {
            Some(data) if !data.is_null() => serde_json::from_value::<DoctorProfile>(data.clone())
                .map_err(|e| DoctorError::backend(e.into(), "Login failed"))?,
            _ => DoctorProfile::default(),
        };

        info!("Doctor {} signed in", profile.username);
        let message = response_message(&result, "Login successful");
        Ok(ApiResponse::ok(message, profile))
    }

    /// Sends the dashboard profile form with the session's refresh token.
    pub async fn update_profile(
        &self,
        profile: &DoctorProfile,
        update: &ProfileUpdate,
    ) -> Result<ApiResponse, DoctorError> {
        validate_profile_update(update)?;
        let (doctor_id, token) = credentials_of(profile)?;

        let payload = serde_json::to_value(update)
            .map_err(|e| DoctorError::backend(e.into(), "Failed to update profile"))?;

        let result: Value = self
            .backend
            .request(
                Method::PATCH,
                &format!("/api/v1/doctor/update-profile/{}", doctor_id),
                Some(token),
                Some(payload),
            )
            .await
            .map_err(|e| DoctorError::backend(e, "Failed to update profile"))?;

        info!("Profile updated for doctor {}", doctor_id);
        let message = response_message(&result, "Profile updated successfully");
        Ok(ApiResponse::ok(message, result))
    }

    /// Uploads a new avatar given as a base64 data URL. Returns the URL the
    /// session should show afterwards.
    pub async fn update_avatar(&self, profile: &DoctorProfile, data_url: &str) -> Result<String, DoctorError> {
        let (mime, bytes) = decode_data_url(data_url)?;
        let (doctor_id, token) = credentials_of(profile)?;
        debug!("Uploading {} avatar ({} bytes) for doctor {}", mime, bytes.len(), doctor_id);

        let result: Value = self
            .backend
            .request(
                Method::PATCH,
                &format!("/api/v1/doctor/update-avatar/{}", doctor_id),
                Some(token),
                Some(json!({ "doctorImage": data_url })),
            )
            .await
            .map_err(|e| DoctorError::backend(e, "Failed to update profile image"))?;

        let url = result
            .pointer("/data/doctorAvatarURL")
            .and_then(Value::as_str)
            .unwrap_or(data_url)
            .to_string();
        Ok(url)
    }

    /// A 404 from the backend still counts as signed out locally.
    pub async fn logout(&self, username: &str) -> Result<ApiResponse, DoctorError> {
        let result = self
            .backend
            .request::<Value>(
                Method::PATCH,
                &format!("/api/v1/doctor/logout/{}", username),
                None,
                None,
            )
            .await;

        match result {
            Ok(body) => {
                info!("Doctor {} logged out", username);
                let message = response_message(&body, "Logged out successfully");
                Ok(ApiResponse::ok(message, body))
            }
            Err(e) if e.is_not_found() => {
                warn!("Logout endpoint returned 404 for {}, logging out locally", username);
                Ok(ApiResponse::ok_empty("Logged out successfully (client-side only)"))
            }
            Err(e) => Err(DoctorError::backend(e, "Logout failed")),
        }
    }
}

fn credentials_of(profile: &DoctorProfile) -> Result<(&str, &str), DoctorError> {
    let doctor_id = profile
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(DoctorError::MissingCredential("doctor id"))?;
    let token = profile
        .refresh_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(DoctorError::MissingCredential("refresh token"))?;
    Ok((doctor_id, token))
}

fn response_message(body: &Value, fallback: &str) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

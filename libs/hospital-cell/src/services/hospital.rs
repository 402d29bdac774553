use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use shared_backend::BackendClient;
use shared_config::AppConfig;
use shared_models::{ApiResponse, LoginCredentials};

use crate::error::HospitalError;
use crate::models::{HospitalLogin, HospitalProfile, HospitalRegistration, HospitalUpdate};
use crate::services::validation::{validate_hospital_registration, validate_hospital_update};

const SIGNUP_PATH: &str = "/api/v1/hospital/signup";
const LOGIN_PATH: &str = "/api/v1/hospital/login";

pub struct HospitalService {
    backend: BackendClient,
}

impl HospitalService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    pub async fn register(&self, registration: &HospitalRegistration) -> Result<ApiResponse, HospitalError> {
        validate_hospital_registration(registration)?;

        debug!(
            "Registering hospital {} with {} facilities",
            registration.username,
            registration.facilities_in_hospital.len()
        );

        let payload = serde_json::to_value(registration)
            .map_err(|e| HospitalError::backend(e.into(), "Failed to register hospital"))?;

        let result: Value = self
            .backend
            .request(Method::POST, SIGNUP_PATH, None, Some(payload))
            .await
            .map_err(|e| HospitalError::backend(e, "Failed to register hospital"))?;

        info!("Hospital {} registered", registration.username);
        Ok(ApiResponse::ok("Hospital registered successfully", result))
    }

    /// Form-encoded login. The caller keeps the returned token for later
    /// bearer calls.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<HospitalLogin, HospitalError> {
        debug!("Hospital login attempt for {}", credentials.email);

        let result: Value = self
            .backend
            .request_form(
                Method::POST,
                LOGIN_PATH,
                &[
                    ("email", credentials.email.as_str()),
                    ("password", credentials.password.as_str()),
                ],
            )
            .await
            .map_err(|e| HospitalError::backend(e, "Failed to login hospital"))?;

        let profile = match result.get("data") {
            Some(data) if !data.is_null() => serde_json::from_value::<HospitalProfile>(data.clone())
                .map_err(|e| HospitalError::backend(e.into(), "Failed to login hospital"))?,
            _ => HospitalProfile::default(),
        };
        let token = result
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        if token.is_none() {
            warn!("Hospital login for {} returned no access token", credentials.email);
        }

        let message = result
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or("Login successful")
            .to_string();

        info!("Hospital {} signed in", profile.username);
        Ok(HospitalLogin {
            message,
            token,
            profile,
        })
    }

    pub async fn update(
        &self,
        hospital_id: &str,
        update: &HospitalUpdate,
        token: &str,
    ) -> Result<ApiResponse, HospitalError> {
        validate_hospital_update(update)?;

        let payload = serde_json::to_value(update)
            .map_err(|e| HospitalError::backend(e.into(), "Failed to update hospital"))?;

        let result: Value = self
            .backend
            .request(
                Method::PUT,
                &format!("/api/hospitals/{}", hospital_id),
                Some(token),
                Some(payload),
            )
            .await
            .map_err(|e| HospitalError::backend(e, "Failed to update hospital"))?;

        info!("Hospital {} updated", hospital_id);
        Ok(ApiResponse::ok("Hospital updated successfully", result))
    }

    /// A 404 from the backend still counts as signed out locally.
    pub async fn logout(&self, username: &str) -> Result<ApiResponse, HospitalError> {
        let result = self
            .backend
            .request::<Value>(
                Method::PATCH,
                &format!("/api/v1/hospital/logout/{}", username),
                None,
                Some(json!({})),
            )
            .await;

        match result {
            Ok(body) => {
                info!("Hospital {} logged out", username);
                Ok(ApiResponse::ok("Logout successful", body))
            }
            Err(e) if e.is_not_found() => {
                warn!("Logout endpoint not found for {}, logging out on client side only", username);
                Ok(ApiResponse::ok_empty("Logged out on client side only"))
            }
            Err(e) => Err(HospitalError::backend(e, "Failed to logout hospital")),
        }
    }

    pub async fn get_by_id(&self, hospital_id: &str, token: Option<&str>) -> Result<ApiResponse, HospitalError> {
        let result: Value = self
            .backend
            .request(
                Method::GET,
                &format!("/api/hospitals/{}", hospital_id),
                token,
                None,
            )
            .await
            .map_err(|e| HospitalError::backend(e, "Failed to retrieve hospital"))?;

        Ok(ApiResponse::ok("Hospital retrieved successfully", result))
    }
}

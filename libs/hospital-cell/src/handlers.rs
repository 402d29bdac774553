use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

use auth_cell::validation::validate_login;
use shared_models::{ApiResponse, AppError, LoginCredentials};

use crate::error::HospitalError;
use crate::models::{HospitalProfile, HospitalRegistration, HospitalUpdate};
use crate::services::HospitalService;
use crate::state::{HospitalState, ACCESS_TOKEN_KEY, USERNAME_KEY};

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<HospitalState>>,
    Json(registration): Json<HospitalRegistration>,
) -> Result<(StatusCode, Json<ApiResponse>), AppError> {
    let hospital_service = HospitalService::new(&state.config);
    let response = hospital_service.register(&registration).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<HospitalState>>,
    Json(credentials): Json<LoginCredentials>,
) -> Result<Json<ApiResponse<HospitalProfile>>, AppError> {
    validate_login(&credentials)?;

    let hospital_service = HospitalService::new(&state.config);
    let login = hospital_service.login(&credentials).await?;

    state
        .session
        .login(login.profile.clone())
        .await
        .map_err(HospitalError::from)?;
    // Values left by an earlier sign-in must not outlive it.
    state
        .session
        .replace_extra(ACCESS_TOKEN_KEY, login.token.as_deref())
        .await
        .map_err(HospitalError::from)?;
    let username = Some(login.profile.username.as_str()).filter(|u| !u.is_empty());
    state
        .session
        .replace_extra(USERNAME_KEY, username)
        .await
        .map_err(HospitalError::from)?;

    Ok(Json(ApiResponse::ok(login.message, login.profile)))
}

/// Clears the local session even when the backend call fails.
pub async fn logout(State(state): State<Arc<HospitalState>>) -> Result<Json<ApiResponse>, AppError> {
    let username = match state.session.get_extra(USERNAME_KEY).await {
        Ok(Some(name)) => Some(name),
        _ => state.session.current().await.map(|p| p.username),
    };

    let response = match username.filter(|u| !u.is_empty()) {
        Some(username) => {
            let hospital_service = HospitalService::new(&state.config);
            match hospital_service.logout(&username).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Backend logout failed for {}: {}", username, e);
                    ApiResponse::ok_empty("Logged out locally")
                }
            }
        }
        None => ApiResponse::ok_empty("Already logged out"),
    };

    state.session.clear().await.map_err(HospitalError::from)?;
    Ok(Json(response))
}

pub async fn get_session(Extension(profile): Extension<HospitalProfile>) -> Json<HospitalProfile> {
    Json(profile)
}

pub async fn update_profile(
    State(state): State<Arc<HospitalState>>,
    Extension(mut profile): Extension<HospitalProfile>,
    Json(update): Json<HospitalUpdate>,
) -> Result<Json<ApiResponse<HospitalProfile>>, AppError> {
    let hospital_id = profile
        .id
        .clone()
        .filter(|id| !id.is_empty())
        .ok_or(HospitalError::MissingCredential("hospital id"))?;
    let token = state
        .session
        .get_extra(ACCESS_TOKEN_KEY)
        .await
        .map_err(HospitalError::from)?
        .ok_or(HospitalError::MissingCredential("access token"))?;

    let hospital_service = HospitalService::new(&state.config);
    let response = hospital_service.update(&hospital_id, &update, &token).await?;

    profile.apply(&update);
    state
        .session
        .update(profile.clone())
        .await
        .map_err(HospitalError::from)?;

    Ok(Json(ApiResponse::ok(response.message, profile)))
}

pub async fn get_hospital(
    State(state): State<Arc<HospitalState>>,
    Path(hospital_id): Path<String>,
) -> Result<Json<ApiResponse>, AppError> {
    let token = state.session.get_extra(ACCESS_TOKEN_KEY).await.ok().flatten();

    let hospital_service = HospitalService::new(&state.config);
    let response = hospital_service
        .get_by_id(&hospital_id, token.as_deref())
        .await?;
    Ok(Json(response))
}

use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use auth_cell::validation::validate_doctor_login;
use shared_models::{ApiResponse, AppError, LoginCredentials};
use shared_utils::image::{file_to_data_url, is_data_url};

use crate::error::DoctorError;
use crate::models::{DaySchedule, DoctorProfile, DoctorRegistration, ProfileUpdate};
use crate::services::{validate_time_slots, DoctorService, WeeklyScheduleView};
use crate::state::DoctorState;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(default)]
    pub time_slots: Vec<DaySchedule>,
}

/// Either an inline data URL or a local image file to encode.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarRequest {
    pub doctor_image: Option<String>,
    pub image_path: Option<String>,
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<DoctorState>>,
    Json(registration): Json<DoctorRegistration>,
) -> Result<(StatusCode, Json<ApiResponse>), AppError> {
    let doctor_service = DoctorService::new(&state.config);
    let response = doctor_service.register(&registration).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<DoctorState>>,
    Json(credentials): Json<LoginCredentials>,
) -> Result<Json<ApiResponse<DoctorProfile>>, AppError> {
    validate_doctor_login(&credentials)?;

    let doctor_service = DoctorService::new(&state.config);
    let response = doctor_service.login(&credentials).await?;

    if let Some(profile) = &response.data {
        state
            .session
            .login(profile.clone())
            .await
            .map_err(DoctorError::from)?;
    }

    Ok(Json(response))
}

/// Clears the local session even when the backend call fails.
pub async fn logout(State(state): State<Arc<DoctorState>>) -> Result<Json<ApiResponse>, AppError> {
    let current = state.session.current().await;

    let response = match current {
        Some(profile) if !profile.username.is_empty() => {
            let doctor_service = DoctorService::new(&state.config);
            match doctor_service.logout(&profile.username).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Backend logout failed for {}: {}", profile.username, e);
                    ApiResponse::ok_empty("Logged out locally")
                }
            }
        }
        _ => ApiResponse::ok_empty("Already logged out"),
    };

    state.session.clear().await.map_err(DoctorError::from)?;
    Ok(Json(response))
}

pub async fn get_session(Extension(profile): Extension<DoctorProfile>) -> Json<DoctorProfile> {
    Json(profile)
}

pub async fn update_profile(
    State(state): State<Arc<DoctorState>>,
    Extension(mut profile): Extension<DoctorProfile>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ApiResponse<DoctorProfile>>, AppError> {
    let doctor_service = DoctorService::new(&state.config);
    let response = doctor_service.update_profile(&profile, &update).await?;

    profile.apply(&update);
    state
        .session
        .update(profile.clone())
        .await
        .map_err(DoctorError::from)?;

    Ok(Json(ApiResponse::ok(response.message, profile)))
}

pub async fn update_avatar(
    State(state): State<Arc<DoctorState>>,
    Extension(mut profile): Extension<DoctorProfile>,
    Json(request): Json<AvatarRequest>,
) -> Result<Json<ApiResponse<DoctorProfile>>, AppError> {
    let data_url = match (request.doctor_image, request.image_path) {
        (Some(url), _) if is_data_url(&url) => url,
        (_, Some(path)) => file_to_data_url(&path).await.map_err(DoctorError::from)?,
        _ => {
            return Err(AppError::BadRequest(
                "Provide doctorImage as a data URL or an imagePath".to_string(),
            ))
        }
    };

    let doctor_service = DoctorService::new(&state.config);
    let avatar_url = doctor_service.update_avatar(&profile, &data_url).await?;

    profile.doctor_avatar_url = Some(avatar_url);
    state
        .session
        .update(profile.clone())
        .await
        .map_err(DoctorError::from)?;

    info!("Avatar updated for {}", profile.username);
    Ok(Json(ApiResponse::ok("Profile image updated successfully", profile)))
}

pub async fn get_schedule(Extension(profile): Extension<DoctorProfile>) -> Json<WeeklyScheduleView> {
    Json(WeeklyScheduleView::build_for_today(&profile.time_slots))
}

pub async fn validate_schedule(Json(request): Json<ScheduleRequest>) -> Result<Json<Value>, AppError> {
    validate_time_slots(&request.time_slots)?;
    Ok(Json(json!({ "valid": true })))
}

pub async fn preview_schedule(Json(request): Json<ScheduleRequest>) -> Json<WeeklyScheduleView> {
    Json(WeeklyScheduleView::build_for_today(&request.time_slots))
}

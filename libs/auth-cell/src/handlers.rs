use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::session::{DOCTOR_SESSION, HOSPITAL_SESSION};
use crate::storage::StorageBackend;

async fn flag_set(storage: &dyn StorageBackend, key: &str) -> Result<bool, AppError> {
    let value = storage
        .get(key)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
    Ok(value.as_deref() == Some("true"))
}

/// Reports which actors currently hold a persisted session.
pub async fn session_status(
    State(storage): State<Arc<dyn StorageBackend>>,
) -> Result<Json<Value>, AppError> {
    debug!("Reading session flags");

    let doctor = flag_set(storage.as_ref(), DOCTOR_SESSION.flag).await?;
    let hospital = flag_set(storage.as_ref(), HOSPITAL_SESSION.flag).await?;

    Ok(Json(json!({
        "doctor": doctor,
        "hospital": hospital,
    })))
}

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tracing::info;

use auth_cell::{FileStorage, StorageBackend};
use doctor_cell::DoctorState;
use hospital_cell::HospitalState;
use shared_config::AppConfig;

pub mod router;

/// Opens the session file, restores both sessions and assembles the routes.
pub async fn build_app(config: AppConfig) -> Result<Router> {
    let config = Arc::new(config);
    let storage: Arc<dyn StorageBackend> = Arc::new(FileStorage::new(&config.session_store_path));

    let doctor = Arc::new(DoctorState::new(config.clone(), storage.clone()));
    let hospital = Arc::new(HospitalState::new(config.clone(), storage.clone()));

    let doctor_restored = doctor
        .session
        .hydrate()
        .await
        .context("Failed to restore doctor session")?;
    let hospital_restored = hospital
        .session
        .hydrate()
        .await
        .context("Failed to restore hospital session")?;
    info!(
        "Sessions restored from {} (doctor: {}, hospital: {})",
        config.session_store_path.display(),
        doctor_restored,
        hospital_restored
    );

    Ok(router::create_router(storage, doctor, hospital))
}

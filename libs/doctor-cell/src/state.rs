use std::sync::Arc;

use auth_cell::{SessionStore, StorageBackend, DOCTOR_SESSION};
use shared_config::AppConfig;

use crate::models::DoctorProfile;

pub struct DoctorState {
    pub config: Arc<AppConfig>,
    pub session: SessionStore<DoctorProfile>,
}

impl DoctorState {
    pub fn new(config: Arc<AppConfig>, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            config,
            session: SessionStore::new(storage, DOCTOR_SESSION),
        }
    }
}

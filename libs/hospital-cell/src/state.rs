use std::sync::Arc;

use auth_cell::{SessionStore, StorageBackend, HOSPITAL_SESSION};
use shared_config::AppConfig;

use crate::models::HospitalProfile;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const USERNAME_KEY: &str = "hospitalUsername";

pub struct HospitalState {
    pub config: Arc<AppConfig>,
    pub session: SessionStore<HospitalProfile>,
}

impl HospitalState {
    pub fn new(config: Arc<AppConfig>, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            config,
            session: SessionStore::new(storage, HOSPITAL_SESSION),
        }
    }
}

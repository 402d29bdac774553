use std::sync::Arc;

use axum::{routing::get, Router};

use auth_cell::router::auth_routes;
use auth_cell::StorageBackend;
use doctor_cell::router::doctor_routes;
use doctor_cell::DoctorState;
use hospital_cell::router::hospital_routes;
use hospital_cell::HospitalState;

pub fn create_router(
    storage: Arc<dyn StorageBackend>,
    doctor: Arc<DoctorState>,
    hospital: Arc<HospitalState>,
) -> Router {
    Router::new()
        .route("/", get(|| async { "CareSetu portal is running!" }))
        .nest("/auth", auth_routes(storage))
        .nest("/doctor", doctor_routes(doctor))
        .nest("/hospital", hospital_routes(hospital))
}

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use auth_cell::middleware::require_session;

use crate::handlers;
use crate::models::DoctorProfile;
use crate::state::DoctorState;

pub fn doctor_routes(state: Arc<DoctorState>) -> Router {
    let public_routes = Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/schedule/validate", post(handlers::validate_schedule))
        .route("/schedule/preview", post(handlers::preview_schedule));

    let protected_routes = Router::new()
        .route("/session", get(handlers::get_session))
        .route("/profile", patch(handlers::update_profile))
        .route("/avatar", patch(handlers::update_avatar))
        .route("/schedule", get(handlers::get_schedule))
        .layer(middleware::from_fn_with_state(
            state.session.clone(),
            require_session::<DoctorProfile>,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

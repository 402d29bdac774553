use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use auth_cell::middleware::require_session;

use crate::handlers;
use crate::models::HospitalProfile;
use crate::state::HospitalState;

pub fn hospital_routes(state: Arc<HospitalState>) -> Router {
    let public_routes = Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/{id}", get(handlers::get_hospital));

    let protected_routes = Router::new()
        .route("/session", get(handlers::get_session))
        .route("/profile", put(handlers::update_profile))
        .layer(middleware::from_fn_with_state(
            state.session.clone(),
            require_session::<HospitalProfile>,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

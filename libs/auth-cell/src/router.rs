use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::storage::StorageBackend;

pub fn auth_routes(storage: Arc<dyn StorageBackend>) -> Router {
    Router::new()
        .route("/status", get(handlers::session_status))
        .with_state(storage)
}

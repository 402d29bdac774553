use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use shared_models::error::AppError;

use crate::session::SessionStore;

/// Rejects requests unless the given session is signed in; the snapshot is
/// placed into request extensions for the handler.
pub async fn require_session<T>(
    State(session): State<SessionStore<T>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    let Some(record) = session.current().await else {
        debug!("Rejected {} without a {} session", request.uri(), session.keys().data);
        return Err(AppError::Auth("Please log in to continue".to_string()));
    };

    request.extensions_mut().insert(record);
    Ok(next.run(request).await)
}

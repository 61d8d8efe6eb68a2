//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use songbook_app::ports::{ArtistRepository, Authenticator, SongRepository};

use crate::error::ApiError;
use crate::routes::API_PREFIX;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the API routes under `/api` next to `/health`, answers any other
/// path with a JSON 404 and an unsupported method with a JSON 405. Includes
/// a [`TraceLayer`] that logs each HTTP request/response at the `DEBUG` level.
pub fn build<AR, SR, AU>(state: AppState<AR, SR, AU>) -> Router
where
    AR: ArtistRepository + Send + Sync + 'static,
    SR: SongRepository + Send + Sync + 'static,
    AU: Authenticator + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest(API_PREFIX, crate::api::routes())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

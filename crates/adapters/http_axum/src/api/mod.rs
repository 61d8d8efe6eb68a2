//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod artists;
#[allow(clippy::missing_errors_doc)]
pub mod songs;

use axum::Router;
use axum::routing::get;

use songbook_app::ports::{ArtistRepository, Authenticator, SongRepository};

use crate::error::ApiError;
use crate::routes::{ARTIST_DETAIL, ARTIST_LIST, SONG_DETAIL, SONG_LIST};
use crate::state::AppState;

/// Build the `/api` sub-router from the named route table.
pub fn routes<AR, SR, AU>() -> Router<AppState<AR, SR, AU>>
where
    AR: ArtistRepository + Send + Sync + 'static,
    SR: SongRepository + Send + Sync + 'static,
    AU: Authenticator + Send + Sync + 'static,
{
    Router::new()
        // Artists
        .route(
            ARTIST_LIST,
            get(artists::list::<AR, SR, AU>).post(artists::create::<AR, SR, AU>),
        )
        .route(
            ARTIST_DETAIL,
            get(artists::get::<AR, SR, AU>)
                .put(artists::replace::<AR, SR, AU>)
                .patch(artists::update::<AR, SR, AU>)
                .delete(artists::delete::<AR, SR, AU>),
        )
        // Songs
        .route(
            SONG_LIST,
            get(songs::list::<AR, SR, AU>).post(songs::create::<AR, SR, AU>),
        )
        .route(
            SONG_DETAIL,
            get(songs::get::<AR, SR, AU>)
                .put(songs::replace::<AR, SR, AU>)
                .patch(songs::update::<AR, SR, AU>)
                .delete(songs::delete::<AR, SR, AU>),
        )
        .method_not_allowed_fallback(method_not_allowed)
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

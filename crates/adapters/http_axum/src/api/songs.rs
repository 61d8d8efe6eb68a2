//! JSON REST handlers for songs.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use songbook_app::ports::{ArtistRepository, Authenticator, SongRepository};
use songbook_domain::access::{Action, Model, Requester};
use songbook_domain::id::SongId;

use crate::error::ApiError;
use crate::extract::{Caller, ItemId};
use crate::serializer::{Presence, SongBody, song};
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<SongBody>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, replace and update endpoints.
pub enum GetResponse {
    Ok(Json<SongBody>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<SongBody>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => {
                let location = json.0.url.clone();
                (StatusCode::CREATED, [(header::LOCATION, location)], json).into_response()
            }
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/songs/`
pub async fn list<AR, SR, AU>(
    State(state): State<AppState<AR, SR, AU>>,
    Caller(requester): Caller,
) -> Result<ListResponse, ApiError>
where
    AR: ArtistRepository + Send + Sync + 'static,
    SR: SongRepository + Send + Sync + 'static,
    AU: Authenticator + Send + Sync + 'static,
{
    state
        .policy
        .check(&requester, Model::Song, Action::View)?;
    let songs = state.song_service.list_songs().await?;
    let bodies = songs
        .into_iter()
        .map(|song| SongBody::new(song, &state.links))
        .collect();
    Ok(ListResponse::Ok(Json(bodies)))
}

/// `GET /api/songs/{id}`
pub async fn get<AR, SR, AU>(
    State(state): State<AppState<AR, SR, AU>>,
    ItemId(id): ItemId<SongId>,
    Caller(requester): Caller,
) -> Result<GetResponse, ApiError>
where
    AR: ArtistRepository + Send + Sync + 'static,
    SR: SongRepository + Send + Sync + 'static,
    AU: Authenticator + Send + Sync + 'static,
{
    state
        .policy
        .check(&requester, Model::Song, Action::View)?;
    let song = state.song_service.get_song(id).await?;
    Ok(GetResponse::Ok(Json(SongBody::new(song, &state.links))))
}

/// `POST /api/songs/`
pub async fn create<AR, SR, AU>(
    State(state): State<AppState<AR, SR, AU>>,
    Caller(requester): Caller,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    AR: ArtistRepository + Send + Sync + 'static,
    SR: SongRepository + Send + Sync + 'static,
    AU: Authenticator + Send + Sync + 'static,
{
    state
        .policy
        .check(&requester, Model::Song, Action::Add)?;
    let Json(body) = body?;
    let song = song::parse_new(&body, state.unknown_fields, &state.links)?;
    let created = state.song_service.create_song(song).await?;
    Ok(CreateResponse::Created(Json(SongBody::new(
        created,
        &state.links,
    ))))
}

/// `PUT /api/songs/{id}`
pub async fn replace<AR, SR, AU>(
    State(state): State<AppState<AR, SR, AU>>,
    ItemId(id): ItemId<SongId>,
    Caller(requester): Caller,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    AR: ArtistRepository + Send + Sync + 'static,
    SR: SongRepository + Send + Sync + 'static,
    AU: Authenticator + Send + Sync + 'static,
{
    save(&state, id, &requester, body, Presence::Required).await
}

/// `PATCH /api/songs/{id}`
pub async fn update<AR, SR, AU>(
    State(state): State<AppState<AR, SR, AU>>,
    ItemId(id): ItemId<SongId>,
    Caller(requester): Caller,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    AR: ArtistRepository + Send + Sync + 'static,
    SR: SongRepository + Send + Sync + 'static,
    AU: Authenticator + Send + Sync + 'static,
{
    save(&state, id, &requester, body, Presence::Optional).await
}

/// `DELETE /api/songs/{id}`
pub async fn delete<AR, SR, AU>(
    State(state): State<AppState<AR, SR, AU>>,
    ItemId(id): ItemId<SongId>,
    Caller(requester): Caller,
) -> Result<DeleteResponse, ApiError>
where
    AR: ArtistRepository + Send + Sync + 'static,
    SR: SongRepository + Send + Sync + 'static,
    AU: Authenticator + Send + Sync + 'static,
{
    state
        .policy
        .check(&requester, Model::Song, Action::Delete)?;
    state.song_service.delete_song(id).await?;
    Ok(DeleteResponse::NoContent)
}

async fn save<AR, SR, AU>(
    state: &AppState<AR, SR, AU>,
    id: SongId,
    requester: &Requester,
    body: Result<Json<Value>, JsonRejection>,
    presence: Presence,
) -> Result<GetResponse, ApiError>
where
    AR: ArtistRepository + Send + Sync + 'static,
    SR: SongRepository + Send + Sync + 'static,
    AU: Authenticator + Send + Sync + 'static,
{
    state
        .policy
        .check(requester, Model::Song, Action::Change)?;
    let Json(body) = body?;
    let patch = song::parse_patch(&body, state.unknown_fields, presence, &state.links)?;
    let song = state.song_service.update_song(id, patch).await?;
    Ok(GetResponse::Ok(Json(SongBody::new(song, &state.links))))
}

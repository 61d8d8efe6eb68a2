//! JSON REST handlers for artists.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use songbook_app::ports::{ArtistRepository, Authenticator, SongRepository};
use songbook_domain::access::{Action, Model, Requester};
use songbook_domain::id::ArtistId;

use crate::error::ApiError;
use crate::extract::{Caller, ItemId};
use crate::serializer::{ArtistBody, Presence, artist};
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<ArtistBody>>),
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
    Ok(Json<ArtistBody>),
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
    Created(Json<ArtistBody>),
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

/// `GET /api/artists/`
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
        .check(&requester, Model::Artist, Action::View)?;
    let artists = state.artist_service.list_artists().await?;
    let bodies = artists
        .into_iter()
        .map(|artist| ArtistBody::new(artist, &state.links))
        .collect();
    Ok(ListResponse::Ok(Json(bodies)))
}

/// `GET /api/artists/{id}`
pub async fn get<AR, SR, AU>(
    State(state): State<AppState<AR, SR, AU>>,
    ItemId(id): ItemId<ArtistId>,
    Caller(requester): Caller,
) -> Result<GetResponse, ApiError>
where
    AR: ArtistRepository + Send + Sync + 'static,
    SR: SongRepository + Send + Sync + 'static,
    AU: Authenticator + Send + Sync + 'static,
{
    state
        .policy
        .check(&requester, Model::Artist, Action::View)?;
    let artist = state.artist_service.get_artist(id).await?;
    Ok(GetResponse::Ok(Json(ArtistBody::new(artist, &state.links))))
}

/// `POST /api/artists/`
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
        .check(&requester, Model::Artist, Action::Add)?;
    let Json(body) = body?;
    let artist = artist::parse_new(&body, state.unknown_fields)?;
    let created = state.artist_service.create_artist(artist).await?;
    Ok(CreateResponse::Created(Json(ArtistBody::new(
        created,
        &state.links,
    ))))
}

/// `PUT /api/artists/{id}`
pub async fn replace<AR, SR, AU>(
    State(state): State<AppState<AR, SR, AU>>,
    ItemId(id): ItemId<ArtistId>,
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

/// `PATCH /api/artists/{id}`
pub async fn update<AR, SR, AU>(
    State(state): State<AppState<AR, SR, AU>>,
    ItemId(id): ItemId<ArtistId>,
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

/// `DELETE /api/artists/{id}`
pub async fn delete<AR, SR, AU>(
    State(state): State<AppState<AR, SR, AU>>,
    ItemId(id): ItemId<ArtistId>,
    Caller(requester): Caller,
) -> Result<DeleteResponse, ApiError>
where
    AR: ArtistRepository + Send + Sync + 'static,
    SR: SongRepository + Send + Sync + 'static,
    AU: Authenticator + Send + Sync + 'static,
{
    state
        .policy
        .check(&requester, Model::Artist, Action::Delete)?;
    state.artist_service.delete_artist(id).await?;
    Ok(DeleteResponse::NoContent)
}

async fn save<AR, SR, AU>(
    state: &AppState<AR, SR, AU>,
    id: ArtistId,
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
        .check(requester, Model::Artist, Action::Change)?;
    let Json(body) = body?;
    let patch = artist::parse_patch(&body, state.unknown_fields, presence)?;
    let artist = state.artist_service.update_artist(id, patch).await?;
    Ok(GetResponse::Ok(Json(ArtistBody::new(artist, &state.links))))
}

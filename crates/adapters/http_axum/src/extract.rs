//! Request extractors for typed path ids and the calling principal.

use std::str::FromStr;

use axum::extract::{FromRequestParts, Path};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use songbook_app::ports::Authenticator;
use songbook_domain::access::{AccessError, Requester};

use crate::error::ApiError;
use crate::state::AppState;

/// A typed `{id}` path segment. Anything that does not parse as `T`
/// answers 404, as if the route never matched.
#[derive(Debug, Clone, Copy)]
pub struct ItemId<T>(pub T);

impl<S, T> FromRequestParts<S> for ItemId<T>
where
    S: Send + Sync,
    T: FromStr + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::RouteNotFound)?;
        raw.parse().map(Self).map_err(|_| ApiError::RouteNotFound)
    }
}

/// Who sent the request, resolved from the `Authorization` header.
///
/// No header means [`Requester::Anonymous`]. A header that is malformed or
/// names an unknown token is rejected outright, whatever the method.
#[derive(Debug, Clone)]
pub struct Caller(pub Requester);

impl<AR, SR, AU> FromRequestParts<AppState<AR, SR, AU>> for Caller
where
    AR: Send + Sync + 'static,
    SR: Send + Sync + 'static,
    AU: Authenticator + Send + Sync + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<AR, SR, AU>,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Self(Requester::Anonymous));
        };
        let Some(token) = header.to_str().ok().and_then(parse_token) else {
            tracing::warn!("malformed authorization header");
            return Err(AccessError::InvalidCredentials.into());
        };
        match state.authenticator.authenticate(token).await? {
            Some(principal) => {
                tracing::debug!(username = %principal.username, "request authenticated");
                Ok(Self(Requester::Authenticated(principal)))
            }
            None => {
                tracing::warn!("unknown api token");
                Err(AccessError::InvalidCredentials.into())
            }
        }
    }
}

/// Extract the key from `Token <key>` or `Bearer <key>`. The scheme is
/// case-insensitive; the key is a single non-empty word.
fn parse_token(value: &str) -> Option<&str> {
    let (scheme, key) = value.trim().split_once(' ')?;
    let key = key.trim();
    let known = scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer");
    (known && !key.is_empty() && !key.contains(char::is_whitespace)).then_some(key)
}

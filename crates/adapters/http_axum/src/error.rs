//! HTTP error response mapping.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use songbook_domain::access::AccessError;
use songbook_domain::error::{FieldError, NON_FIELD_ERRORS, SongbookError, ValidationErrors};

/// JSON error body returned by API endpoints.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: None,
        }
    }

    fn validation(errors: &ValidationErrors) -> Self {
        let fields = errors
            .iter()
            .map(|(field, errors)| {
                let messages = errors.iter().map(ToString::to_string).collect();
                (field.to_string(), messages)
            })
            .collect();
        Self {
            error: "validation failed".to_string(),
            fields: Some(fields),
        }
    }
}

/// Maps [`SongbookError`] and request rejections to an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// An error raised by the domain or a service.
    Domain(SongbookError),
    /// The request body could not be read as JSON.
    Body(JsonRejection),
    /// The path did not match a typed route.
    RouteNotFound,
    /// The route exists but does not accept the request method.
    MethodNotAllowed,
}

impl From<SongbookError> for ApiError {
    fn from(err: SongbookError) -> Self {
        Self::Domain(err)
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        Self::Domain(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        Self::Body(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Domain(SongbookError::Validation(errors)) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::validation(&errors))).into_response()
            }
            Self::Domain(SongbookError::NotFound(err)) => {
                (StatusCode::NOT_FOUND, Json(ErrorBody::message(err.to_string()))).into_response()
            }
            Self::Domain(SongbookError::Access(err)) => access_response(&err),
            Self::Domain(SongbookError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::message("internal server error")),
                )
                    .into_response()
            }
            Self::Body(rejection) => body_response(&rejection),
            Self::RouteNotFound => {
                (StatusCode::NOT_FOUND, Json(ErrorBody::message("not found"))).into_response()
            }
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(ErrorBody::message("method not allowed")),
            )
                .into_response(),
        }
    }
}

fn access_response(err: &AccessError) -> Response {
    let body = Json(ErrorBody::message(err.to_string()));
    match err {
        AccessError::NotAuthenticated | AccessError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Token")],
            body,
        )
            .into_response(),
        AccessError::PermissionDenied { username, permission } => {
            tracing::info!(%username, %permission, "permission denied");
            (StatusCode::FORBIDDEN, body).into_response()
        }
    }
}

/// Malformed JSON is a client error against the whole payload. Other
/// rejections (wrong content type, oversized body) keep their own status.
fn body_response(rejection: &JsonRejection) -> Response {
    match rejection {
        JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
            tracing::debug!(reason = %rejection.body_text(), "rejected request body");
            let errors = ValidationErrors::single(NON_FIELD_ERRORS, FieldError::Malformed);
            (StatusCode::BAD_REQUEST, Json(ErrorBody::validation(&errors))).into_response()
        }
        _ => (
            rejection.status(),
            Json(ErrorBody::message(rejection.body_text())),
        )
            .into_response(),
    }
}

//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SongbookError`] via `#[from]` (no `String` variants).

use std::collections::BTreeMap;

use crate::access::AccessError;

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Top-level error shared by services and adapters.
#[derive(Debug, thiserror::Error)]
pub enum SongbookError {
    /// One or more fields failed validation.
    #[error("validation failed")]
    Validation(#[from] ValidationErrors),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The requester is not allowed to perform the action.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A lookup by identifier did not resolve.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("this field is required")]
    Required,

    #[error("this field may not be null")]
    Null,

    #[error("this field may not be blank")]
    Blank,

    #[error("ensure this field has no more than {max} characters")]
    TooLong { max: usize },

    #[error("enter a valid URL")]
    InvalidUrl,

    #[error("expected {expected}")]
    WrongType { expected: &'static str },

    #[error("unknown field")]
    Unknown,

    #[error("invalid pk \"{0}\", object does not exist")]
    DoesNotExist(i64),

    #[error("invalid hyperlink, no URL match")]
    InvalidHyperlink,

    #[error("malformed JSON body")]
    Malformed,
}

/// Every field error collected while validating one payload.
///
/// Fields are kept sorted so that error bodies are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("validation failed on {} field(s)", .fields.len())]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<FieldError>>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a set holding exactly one error.
    #[must_use]
    pub fn single(field: impl Into<String>, error: FieldError) -> Self {
        let mut errors = Self::new();
        errors.add(field, error);
        errors
    }

    /// Record an error against `field`.
    pub fn add(&mut self, field: impl Into<String>, error: FieldError) {
        self.fields.entry(field.into()).or_default().push(error);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Errors recorded for a single field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[FieldError]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Iterate over `(field, errors)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldError])> {
        self.fields
            .iter()
            .map(|(field, errors)| (field.as_str(), errors.as_slice()))
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_be_ok_when_nothing_recorded() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn should_group_errors_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", FieldError::Blank);
        errors.add("name", FieldError::TooLong { max: 100 });
        errors.add("album", FieldError::Required);

        assert_eq!(
            errors.get("name"),
            Some([FieldError::Blank, FieldError::TooLong { max: 100 }].as_slice())
        );
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["album", "name"]);
    }

    #[test]
    fn should_render_human_readable_messages() {
        assert_eq!(FieldError::Required.to_string(), "this field is required");
        assert_eq!(
            FieldError::TooLong { max: 200 }.to_string(),
            "ensure this field has no more than 200 characters"
        );
        let not_found = NotFoundError {
            entity: "Song",
            id: "12".to_string(),
        };
        assert_eq!(not_found.to_string(), "Song 12 not found");
    }
}

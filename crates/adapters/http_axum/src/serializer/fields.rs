//! Field-by-field reader over a JSON payload.

use serde_json::{Map, Value};

use songbook_domain::error::{FieldError, NON_FIELD_ERRORS, ValidationErrors};
use songbook_domain::field::{check_text, check_url};

use super::{Presence, UnknownFields};

/// Pulls typed fields out of a JSON object while collecting every error.
pub(crate) struct Reader<'a> {
    object: Option<&'a Map<String, Value>>,
    presence: Presence,
    errors: ValidationErrors,
}

impl<'a> Reader<'a> {
    /// Start reading `value`. `known` lists every declared key, read-only
    /// ones included, so that they are never reported as unknown.
    pub(crate) fn open(
        value: &'a Value,
        known: &[&str],
        unknown: UnknownFields,
        presence: Presence,
    ) -> Self {
        let mut errors = ValidationErrors::new();
        let object = value.as_object();
        match object {
            None => errors.add(NON_FIELD_ERRORS, FieldError::WrongType { expected: "object" }),
            Some(map) if unknown == UnknownFields::Reject => {
                for key in map.keys().filter(|key| !known.contains(&key.as_str())) {
                    errors.add(key.clone(), FieldError::Unknown);
                }
            }
            Some(_) => {}
        }
        Self {
            object,
            presence,
            errors,
        }
    }

    pub(crate) fn presence(&self) -> Presence {
        self.presence
    }

    /// Whether the payload carries `field` at all, even as `null`.
    pub(crate) fn contains(&self, field: &str) -> bool {
        self.object.is_some_and(|map| map.contains_key(field))
    }

    /// The raw value of `field`. A missing field is an error only when
    /// `required`; an explicit `null` is always one.
    fn raw(&mut self, field: &'static str, required: bool) -> Option<&'a Value> {
        let map = self.object?;
        match map.get(field) {
            None => {
                if required {
                    self.errors.add(field, FieldError::Required);
                }
                None
            }
            Some(Value::Null) => {
                self.errors.add(field, FieldError::Null);
                None
            }
            Some(value) => Some(value),
        }
    }

    /// A string field, without content checks.
    pub(crate) fn string(&mut self, field: &'static str, required: bool) -> Option<&'a str> {
        match self.raw(field, required)? {
            Value::String(value) => Some(value.as_str()),
            _ => {
                self.errors
                    .add(field, FieldError::WrongType { expected: "string" });
                None
            }
        }
    }

    /// An integer field. Digit strings are accepted as well.
    pub(crate) fn integer(&mut self, field: &'static str, required: bool) -> Option<i64> {
        let parsed = match self.raw(field, required)? {
            Value::Number(number) => number.as_i64(),
            Value::String(value) => value.trim().parse().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.errors
                .add(field, FieldError::WrongType { expected: "integer" });
        }
        parsed
    }

    /// A writable text column, checked for blankness and length.
    pub(crate) fn text(&mut self, field: &'static str, max: usize) -> Option<String> {
        let required = self.presence == Presence::Required;
        let value = self.string(field, required)?;
        check_text(&mut self.errors, field, value, max);
        Some(value.to_string())
    }

    /// A writable URL column, checked for shape and length.
    pub(crate) fn url(&mut self, field: &'static str, max: usize) -> Option<String> {
        let required = self.presence == Presence::Required;
        let value = self.string(field, required)?;
        check_url(&mut self.errors, field, value, max);
        Some(value.to_string())
    }

    pub(crate) fn add(&mut self, field: &'static str, error: FieldError) {
        self.errors.add(field, error);
    }

    /// Hand back every collected error, or `Ok(())` when the payload is clean.
    pub(crate) fn finish(self) -> Result<(), ValidationErrors> {
        self.errors.into_result()
    }
}

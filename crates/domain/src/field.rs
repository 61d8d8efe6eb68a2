//! Field-level checks shared by every record type.

use url::Url;

use crate::error::{FieldError, ValidationErrors};

/// Check a required text column: non-blank and at most `max` characters.
pub fn check_text(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.add(field, FieldError::Blank);
    } else if value.chars().count() > max {
        errors.add(field, FieldError::TooLong { max });
    }
}

/// Check a required URL column: an absolute `http`/`https` URL with a host,
/// at most `max` characters.
pub fn check_url(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.add(field, FieldError::Blank);
        return;
    }
    if value.chars().count() > max {
        errors.add(field, FieldError::TooLong { max });
    }
    if !is_web_url(value) {
        errors.add(field, FieldError::InvalidUrl);
    }
}

fn is_web_url(value: &str) -> bool {
    Url::parse(value)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
}

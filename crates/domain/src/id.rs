//! Typed identifier newtypes backed by positive 64-bit integers.
//!
//! Identifiers are assigned by the store on insert. Their textual form is
//! strictly ASCII digits: no sign, no whitespace, no leading `+`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Failure to parse an identifier from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseIdError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier must only contain ASCII digits")]
    NotDigits,
    #[error("identifier is out of range")]
    OutOfRange,
}

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw value, rejecting zero and negatives.
            #[must_use]
            pub fn new(value: i64) -> Option<Self> {
                (value > 0).then_some(Self(value))
            }

            /// Access the inner integer.
            #[must_use]
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ParseIdError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(ParseIdError::OutOfRange)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_digits(s).map(Self)
            }
        }
    };
}

fn parse_digits(s: &str) -> Result<i64, ParseIdError> {
    if s.is_empty() {
        return Err(ParseIdError::Empty);
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseIdError::NotDigits);
    }
    match s.parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ParseIdError::OutOfRange),
    }
}

define_id!(
    /// Unique identifier for an [`Artist`](crate::artist::Artist).
    ArtistId
);

define_id!(
    /// Unique identifier for a [`Song`](crate::song::Song).
    SongId
);

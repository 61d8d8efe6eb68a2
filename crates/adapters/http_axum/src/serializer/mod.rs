//! Wire representation of artists and songs.
//!
//! Outgoing records are rendered with hyperlinks for their relations.
//! Incoming payloads are read from a raw [`serde_json::Value`] so that every
//! failing field can be reported at once instead of stopping at the first
//! serde error.

pub mod artist;
mod fields;
pub mod song;

use serde::Deserialize;

pub use artist::ArtistBody;
pub use song::SongBody;

/// What to do with keys a payload carries that the resource does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFields {
    #[default]
    Ignore,
    Reject,
}

/// Whether writable fields may be left out of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// `POST` and `PUT`: every writable field must be present.
    Required,
    /// `PATCH`: any subset may be present.
    Optional,
}

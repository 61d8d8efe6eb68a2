//! Artist representation.

use serde::Serialize;
use serde_json::Value;

use songbook_domain::artist::{
    ArtistPatch, ArtistWithSongs, NAME_MAX_LEN, NATIONALITY_MAX_LEN, NewArtist, PHOTO_URL_MAX_LEN,
};
use songbook_domain::error::ValidationErrors;

use super::fields::Reader;
use super::{Presence, UnknownFields};
use crate::routes::Links;

/// Every key an artist payload may carry. `url`, `id` and `songs` are
/// read-only and ignored on input.
const KNOWN: &[&str] = &["url", "id", "name", "nationality", "photo_url", "songs"];

/// JSON shape of an artist.
#[derive(Debug, Serialize)]
pub struct ArtistBody {
    pub url: String,
    pub id: i64,
    pub name: String,
    pub nationality: String,
    pub photo_url: String,
    pub songs: Vec<String>,
}

impl ArtistBody {
    #[must_use]
    pub fn new(record: ArtistWithSongs, links: &Links) -> Self {
        let ArtistWithSongs { artist, songs } = record;
        Self {
            url: links.artist(artist.id),
            id: artist.id.get(),
            name: artist.name,
            nationality: artist.nationality,
            photo_url: artist.photo_url,
            songs: songs.into_iter().map(|id| links.song(id)).collect(),
        }
    }
}

/// Read a complete artist from a `POST` body.
///
/// # Errors
///
/// Returns every failing field when the payload is not a valid artist.
pub fn parse_new(value: &Value, unknown: UnknownFields) -> Result<NewArtist, ValidationErrors> {
    let ArtistPatch {
        name,
        nationality,
        photo_url,
    } = parse_patch(value, unknown, Presence::Required)?;
    NewArtist::builder()
        .name(name.unwrap_or_default())
        .nationality(nationality.unwrap_or_default())
        .photo_url(photo_url.unwrap_or_default())
        .build()
}

/// Read the writable artist fields from a `PUT` or `PATCH` body.
///
/// # Errors
///
/// Returns every failing field. With [`Presence::Required`] a missing
/// field is an error too.
pub fn parse_patch(
    value: &Value,
    unknown: UnknownFields,
    presence: Presence,
) -> Result<ArtistPatch, ValidationErrors> {
    let mut reader = Reader::open(value, KNOWN, unknown, presence);
    let name = reader.text("name", NAME_MAX_LEN);
    let nationality = reader.text("nationality", NATIONALITY_MAX_LEN);
    let photo_url = reader.url("photo_url", PHOTO_URL_MAX_LEN);
    reader.finish()?;
    Ok(ArtistPatch {
        name,
        nationality,
        photo_url,
    })
}

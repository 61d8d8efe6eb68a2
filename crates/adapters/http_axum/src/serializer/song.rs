//! Song representation.

use serde::Serialize;
use serde_json::Value;

use songbook_domain::error::{FieldError, ValidationErrors};
use songbook_domain::id::ArtistId;
use songbook_domain::song::{
    ALBUM_MAX_LEN, NewSong, PREVIEW_URL_MAX_LEN, Song, SongPatch, TITLE_MAX_LEN,
};

use super::fields::Reader;
use super::{Presence, UnknownFields};
use crate::routes::{Links, Route};

/// Every key a song payload may carry. `url` and `id` are read-only.
const KNOWN: &[&str] = &[
    "url",
    "id",
    "title",
    "album",
    "preview_url",
    "artist",
    "artist_id",
];

/// JSON shape of a song.
#[derive(Debug, Serialize)]
pub struct SongBody {
    pub url: String,
    pub id: i64,
    pub title: String,
    pub album: String,
    pub preview_url: String,
    pub artist: String,
}

impl SongBody {
    #[must_use]
    pub fn new(song: Song, links: &Links) -> Self {
        Self {
            url: links.song(song.id),
            id: song.id.get(),
            title: song.title,
            album: song.album,
            preview_url: song.preview_url,
            artist: links.artist(song.artist_id),
        }
    }
}

/// Read a complete song from a `POST` body.
///
/// # Errors
///
/// Returns every failing field when the payload is not a valid song.
/// Whether the referenced artist exists is not checked here.
pub fn parse_new(
    value: &Value,
    unknown: UnknownFields,
    links: &Links,
) -> Result<NewSong, ValidationErrors> {
    let SongPatch {
        title,
        album,
        preview_url,
        artist_id,
    } = parse_patch(value, unknown, Presence::Required, links)?;
    let mut builder = NewSong::builder()
        .title(title.unwrap_or_default())
        .album(album.unwrap_or_default())
        .preview_url(preview_url.unwrap_or_default());
    if let Some(artist_id) = artist_id {
        builder = builder.artist_id(artist_id);
    }
    builder.build()
}

/// Read the writable song fields from a `PUT` or `PATCH` body.
///
/// # Errors
///
/// Returns every failing field. With [`Presence::Required`] a missing
/// field is an error too.
pub fn parse_patch(
    value: &Value,
    unknown: UnknownFields,
    presence: Presence,
    links: &Links,
) -> Result<SongPatch, ValidationErrors> {
    let mut reader = Reader::open(value, KNOWN, unknown, presence);
    let title = reader.text("title", TITLE_MAX_LEN);
    let album = reader.text("album", ALBUM_MAX_LEN);
    let preview_url = reader.url("preview_url", PREVIEW_URL_MAX_LEN);
    let artist_id = read_artist(&mut reader, links);
    reader.finish()?;
    Ok(SongPatch {
        title,
        album,
        preview_url,
        artist_id,
    })
}

/// The owning artist, given either as `artist_id` or as an `artist`
/// hyperlink. `artist_id` wins when both are sent.
fn read_artist(reader: &mut Reader<'_>, links: &Links) -> Option<ArtistId> {
    if reader.contains("artist_id") {
        let raw = reader.integer("artist_id", false)?;
        let id = ArtistId::new(raw);
        if id.is_none() {
            reader.add("artist", FieldError::DoesNotExist(raw));
        }
        return id;
    }
    if reader.contains("artist") {
        let href = reader.string("artist", false)?;
        return match links.resolve(href) {
            Some(Route::ArtistDetail(id)) => Some(id),
            _ => {
                reader.add("artist", FieldError::InvalidHyperlink);
                None
            }
        };
    }
    if reader.presence() == Presence::Required {
        reader.add("artist", FieldError::Required);
    }
    None
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use url::Url;

    use songbook_domain::id::SongId;

    use super::*;

    fn links() -> Links {
        Links::default()
    }

    fn body(artist_key: &str, artist: Value) -> Value {
        let mut body = json!({
            "title": "Maggot Brain",
            "album": "Maggot Brain",
            "preview_url": "https://example.com/maggot-brain.mp3",
        });
        body[artist_key] = artist;
        body
    }

    #[test]
    fn should_render_artist_as_hyperlink() {
        let song = Song {
            id: SongId::new(4).unwrap(),
            title: "Maggot Brain".to_string(),
            album: "Maggot Brain".to_string(),
            preview_url: "https://example.com/maggot-brain.mp3".to_string(),
            artist_id: ArtistId::new(1).unwrap(),
        };
        let links = Links::new(Some(Url::parse("http://localhost:8000").unwrap()));

        let rendered = serde_json::to_value(SongBody::new(song, &links)).unwrap();

        assert_eq!(rendered["url"], "http://localhost:8000/api/songs/4");
        assert_eq!(rendered["artist"], "http://localhost:8000/api/artists/1");
        assert_eq!(rendered["id"], 4);
    }

    #[test]
    fn should_accept_artist_id() {
        let song = parse_new(&body("artist_id", json!(3)), UnknownFields::Ignore, &links())
            .unwrap();
        assert_eq!(song.artist_id, ArtistId::new(3).unwrap());
    }

    #[test]
    fn should_accept_artist_hyperlink() {
        let song = parse_new(
            &body("artist", json!("http://testserver/api/artists/8")),
            UnknownFields::Reject,
            &links(),
        )
        .unwrap();
        assert_eq!(song.artist_id, ArtistId::new(8).unwrap());
    }

    #[test]
    fn should_reject_hyperlink_to_another_route() {
        let errors = parse_new(
            &body("artist", json!("/api/songs/8")),
            UnknownFields::Ignore,
            &links(),
        )
        .unwrap_err();
        assert_eq!(
            errors.get("artist"),
            Some([FieldError::InvalidHyperlink].as_slice())
        );
    }

    #[test]
    fn should_reject_non_positive_artist_id() {
        let errors = parse_new(&body("artist_id", json!(0)), UnknownFields::Ignore, &links())
            .unwrap_err();
        assert_eq!(
            errors.get("artist"),
            Some([FieldError::DoesNotExist(0)].as_slice())
        );
    }

    #[test]
    fn should_require_artist_on_create() {
        let errors = parse_new(&body("other", json!(1)), UnknownFields::Ignore, &links())
            .unwrap_err();
        assert_eq!(errors.get("artist"), Some([FieldError::Required].as_slice()));
    }

    #[test]
    fn should_allow_patch_without_artist() {
        let patch = parse_patch(
            &json!({ "album": "Standing on the Verge of Getting It On" }),
            UnknownFields::Ignore,
            Presence::Optional,
            &links(),
        )
        .unwrap();

        assert_eq!(patch.artist_id, None);
        assert_eq!(
            patch.album.as_deref(),
            Some("Standing on the Verge of Getting It On")
        );
    }

    #[test]
    fn should_report_field_and_artist_errors_together() {
        let body = json!({
            "title": " ",
            "album": "Maggot Brain",
            "preview_url": "ftp://example.com/a.mp3",
            "artist": "nonsense",
        });

        let errors = parse_new(&body, UnknownFields::Ignore, &links()).unwrap_err();

        assert_eq!(errors.get("title"), Some([FieldError::Blank].as_slice()));
        assert_eq!(
            errors.get("preview_url"),
            Some([FieldError::InvalidUrl].as_slice())
        );
        assert_eq!(
            errors.get("artist"),
            Some([FieldError::InvalidHyperlink].as_slice())
        );
    }
}

//! Song: a track that belongs to exactly one artist.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, SongbookError, ValidationErrors};
use crate::field::{check_text, check_url};
use crate::id::{ArtistId, SongId};

pub const TITLE_MAX_LEN: usize = 200;
pub const ALBUM_MAX_LEN: usize = 200;
pub const PREVIEW_URL_MAX_LEN: usize = 200;

/// A stored song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub album: String,
    pub preview_url: String,
    pub artist_id: ArtistId,
}

impl Song {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SongbookError::Validation`] listing every failing field.
    pub fn validate(&self) -> Result<(), SongbookError> {
        validate_fields(&self.title, &self.album, &self.preview_url)
    }

    /// Overwrite every field present in `patch`.
    pub fn apply(&mut self, patch: SongPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(album) = patch.album {
            self.album = album;
        }
        if let Some(preview_url) = patch.preview_url {
            self.preview_url = preview_url;
        }
        if let Some(artist_id) = patch.artist_id {
            self.artist_id = artist_id;
        }
    }
}

/// A song that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub title: String,
    pub album: String,
    pub preview_url: String,
    pub artist_id: ArtistId,
}

impl NewSong {
    /// Create a builder for constructing a [`NewSong`].
    #[must_use]
    pub fn builder() -> NewSongBuilder {
        NewSongBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SongbookError::Validation`] listing every failing field.
    pub fn validate(&self) -> Result<(), SongbookError> {
        validate_fields(&self.title, &self.album, &self.preview_url)
    }

    /// Attach the identifier assigned by the store.
    #[must_use]
    pub fn into_song(self, id: SongId) -> Song {
        Song {
            id,
            title: self.title,
            album: self.album,
            preview_url: self.preview_url,
            artist_id: self.artist_id,
        }
    }
}

/// Step-by-step builder for [`NewSong`].
#[derive(Debug, Default)]
pub struct NewSongBuilder {
    title: Option<String>,
    album: Option<String>,
    preview_url: Option<String>,
    artist_id: Option<ArtistId>,
}

impl NewSongBuilder {
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    #[must_use]
    pub fn preview_url(mut self, preview_url: impl Into<String>) -> Self {
        self.preview_url = Some(preview_url.into());
        self
    }

    #[must_use]
    pub fn artist_id(mut self, artist_id: ArtistId) -> Self {
        self.artist_id = Some(artist_id);
        self
    }

    /// Consume the builder, validate, and return a [`NewSong`].
    ///
    /// # Errors
    ///
    /// Returns every missing or invalid field,
    /// including a missing artist reference.
    pub fn build(self) -> Result<NewSong, ValidationErrors> {
        let title = self.title.unwrap_or_default();
        let album = self.album.unwrap_or_default();
        let preview_url = self.preview_url.unwrap_or_default();
        let mut errors = field_errors(&title, &album, &preview_url);
        let Some(artist_id) = self.artist_id else {
            errors.add("artist", FieldError::Required);
            return Err(errors);
        };
        errors.into_result()?;
        Ok(NewSong {
            title,
            album,
            preview_url,
            artist_id,
        })
    }
}

/// A partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongPatch {
    pub title: Option<String>,
    pub album: Option<String>,
    pub preview_url: Option<String>,
    pub artist_id: Option<ArtistId>,
}

fn validate_fields(title: &str, album: &str, preview_url: &str) -> Result<(), SongbookError> {
    field_errors(title, album, preview_url).into_result()?;
    Ok(())
}

fn field_errors(title: &str, album: &str, preview_url: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check_text(&mut errors, "title", title, TITLE_MAX_LEN);
    check_text(&mut errors, "album", album, ALBUM_MAX_LEN);
    check_url(&mut errors, "preview_url", preview_url, PREVIEW_URL_MAX_LEN);
    errors
}

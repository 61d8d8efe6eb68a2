//! Artist: a performer owning zero or more songs.

use serde::{Deserialize, Serialize};

use crate::error::{SongbookError, ValidationErrors};
use crate::field::{check_text, check_url};
use crate::id::{ArtistId, SongId};

pub const NAME_MAX_LEN: usize = 100;
pub const NATIONALITY_MAX_LEN: usize = 100;
pub const PHOTO_URL_MAX_LEN: usize = 200;

/// A stored artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub nationality: String,
    pub photo_url: String,
}

impl Artist {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SongbookError::Validation`] listing every failing field.
    pub fn validate(&self) -> Result<(), SongbookError> {
        validate_fields(&self.name, &self.nationality, &self.photo_url)
    }

    /// Overwrite every field present in `patch`.
    pub fn apply(&mut self, patch: ArtistPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(nationality) = patch.nationality {
            self.nationality = nationality;
        }
        if let Some(photo_url) = patch.photo_url {
            self.photo_url = photo_url;
        }
    }
}

/// An artist that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtist {
    pub name: String,
    pub nationality: String,
    pub photo_url: String,
}

impl NewArtist {
    /// Create a builder for constructing a [`NewArtist`].
    #[must_use]
    pub fn builder() -> NewArtistBuilder {
        NewArtistBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SongbookError::Validation`] listing every failing field.
    pub fn validate(&self) -> Result<(), SongbookError> {
        validate_fields(&self.name, &self.nationality, &self.photo_url)
    }

    /// Attach the identifier assigned by the store.
    #[must_use]
    pub fn into_artist(self, id: ArtistId) -> Artist {
        Artist {
            id,
            name: self.name,
            nationality: self.nationality,
            photo_url: self.photo_url,
        }
    }
}

/// Step-by-step builder for [`NewArtist`].
#[derive(Debug, Default)]
pub struct NewArtistBuilder {
    name: Option<String>,
    nationality: Option<String>,
    photo_url: Option<String>,
}

impl NewArtistBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = Some(nationality.into());
        self
    }

    #[must_use]
    pub fn photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    /// Consume the builder, validate, and return a [`NewArtist`].
    ///
    /// # Errors
    ///
    /// Returns every missing or invalid field.
    pub fn build(self) -> Result<NewArtist, ValidationErrors> {
        let artist = NewArtist {
            name: self.name.unwrap_or_default(),
            nationality: self.nationality.unwrap_or_default(),
            photo_url: self.photo_url.unwrap_or_default(),
        };
        field_errors(&artist.name, &artist.nationality, &artist.photo_url).into_result()?;
        Ok(artist)
    }
}

/// A partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistPatch {
    pub name: Option<String>,
    pub nationality: Option<String>,
    pub photo_url: Option<String>,
}

/// An artist together with the songs it owns, in id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistWithSongs {
    pub artist: Artist,
    pub songs: Vec<SongId>,
}

fn validate_fields(name: &str, nationality: &str, photo_url: &str) -> Result<(), SongbookError> {
    field_errors(name, nationality, photo_url).into_result()?;
    Ok(())
}

fn field_errors(name: &str, nationality: &str, photo_url: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check_text(&mut errors, "name", name, NAME_MAX_LEN);
    check_text(&mut errors, "nationality", nationality, NATIONALITY_MAX_LEN);
    check_url(&mut errors, "photo_url", photo_url, PHOTO_URL_MAX_LEN);
    errors
}

//! Artist service: use-cases for managing artists.

use std::collections::BTreeMap;

use songbook_domain::artist::{ArtistPatch, ArtistWithSongs, NewArtist};
use songbook_domain::error::{NotFoundError, SongbookError};
use songbook_domain::id::{ArtistId, SongId};

use crate::ports::{ArtistRepository, SongRepository};

/// Application service for artist CRUD operations.
///
/// Every artist is returned together with the ids of the songs it owns,
/// which the HTTP layer renders as hyperlinks.
pub struct ArtistService<AR, SR> {
    artists: AR,
    songs: SR,
}

impl<AR: ArtistRepository, SR: SongRepository> ArtistService<AR, SR> {
    /// Create a new service backed by the given repositories.
    pub fn new(artists: AR, songs: SR) -> Self {
        Self { artists, songs }
    }

    /// Create a new artist after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SongbookError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, artist), fields(artist_name = %artist.name))]
    pub async fn create_artist(&self, artist: NewArtist) -> Result<ArtistWithSongs, SongbookError> {
        artist.validate()?;
        let artist = self.artists.create(artist).await?;
        tracing::debug!(artist_id = %artist.id, "artist created");
        Ok(ArtistWithSongs {
            artist,
            songs: Vec::new(),
        })
    }

    /// Look up an artist by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`SongbookError::NotFound`] when no artist with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_artist(&self, id: ArtistId) -> Result<ArtistWithSongs, SongbookError> {
        let artist = self.artists.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
        let songs = self.song_ids(id).await?;
        Ok(ArtistWithSongs { artist, songs })
    }

    /// List all artists with their songs.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    pub async fn list_artists(&self) -> Result<Vec<ArtistWithSongs>, SongbookError> {
        let artists = self.artists.get_all().await?;
        let mut owned: BTreeMap<ArtistId, Vec<SongId>> = BTreeMap::new();
        for song in self.songs.get_all().await? {
            owned.entry(song.artist_id).or_default().push(song.id);
        }
        Ok(artists
            .into_iter()
            .map(|artist| {
                let songs = owned.remove(&artist.id).unwrap_or_default();
                ArtistWithSongs { artist, songs }
            })
            .collect())
    }

    /// Apply `patch` to an existing artist and persist the result.
    ///
    /// A full replacement is a patch with every field set.
    ///
    /// # Errors
    ///
    /// Returns [`SongbookError::NotFound`] when the artist is missing,
    /// [`SongbookError::Validation`] if the patched artist breaks an
    /// invariant, or a storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_artist(
        &self,
        id: ArtistId,
        patch: ArtistPatch,
    ) -> Result<ArtistWithSongs, SongbookError> {
        let mut artist = self.artists.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
        artist.apply(patch);
        artist.validate()?;
        let artist = self.artists.update(artist).await?.ok_or_else(|| not_found(id))?;
        let songs = self.song_ids(id).await?;
        Ok(ArtistWithSongs { artist, songs })
    }

    /// Delete an artist (and, through the store, its songs).
    ///
    /// # Errors
    ///
    /// Returns [`SongbookError::NotFound`] when no artist with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_artist(&self, id: ArtistId) -> Result<(), SongbookError> {
        if self.artists.delete(id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    async fn song_ids(&self, id: ArtistId) -> Result<Vec<SongId>, SongbookError> {
        let songs = self.songs.find_by_artist(id).await?;
        Ok(songs.into_iter().map(|song| song.id).collect())
    }
}

fn not_found(id: ArtistId) -> SongbookError {
    NotFoundError {
        entity: "Artist",
        id: id.to_string(),
    }
    .into()
}

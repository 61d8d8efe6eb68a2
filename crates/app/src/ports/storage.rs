//! Storage port: repository traits for persistence.
//!
//! Identifiers are assigned by the store, so `create` takes a draft and
//! returns the stored record. Listings are ordered by ascending id.

use std::future::Future;

use songbook_domain::artist::{Artist, NewArtist};
use songbook_domain::error::SongbookError;
use songbook_domain::id::{ArtistId, SongId};
use songbook_domain::song::{NewSong, Song};

/// Repository for persisting and querying [`Artist`]s.
pub trait ArtistRepository {
    /// Insert a new artist and return it with its assigned id.
    fn create(
        &self,
        artist: NewArtist,
    ) -> impl Future<Output = Result<Artist, SongbookError>> + Send;

    /// Get an artist by its unique identifier.
    fn get_by_id(
        &self,
        id: ArtistId,
    ) -> impl Future<Output = Result<Option<Artist>, SongbookError>> + Send;

    /// Get all artists.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Artist>, SongbookError>> + Send;

    /// Overwrite a stored artist. Returns `None` when no row has that id.
    fn update(
        &self,
        artist: Artist,
    ) -> impl Future<Output = Result<Option<Artist>, SongbookError>> + Send;

    /// Delete an artist and the songs it owns. Returns whether a row was removed.
    fn delete(&self, id: ArtistId) -> impl Future<Output = Result<bool, SongbookError>> + Send;
}

/// Repository for persisting and querying [`Song`]s.
pub trait SongRepository {
    /// Insert a new song and return it with its assigned id.
    fn create(&self, song: NewSong) -> impl Future<Output = Result<Song, SongbookError>> + Send;

    /// Get a song by its unique identifier.
    fn get_by_id(
        &self,
        id: SongId,
    ) -> impl Future<Output = Result<Option<Song>, SongbookError>> + Send;

    /// Get all songs.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Song>, SongbookError>> + Send;

    /// Get every song owned by the given artist.
    fn find_by_artist(
        &self,
        artist_id: ArtistId,
    ) -> impl Future<Output = Result<Vec<Song>, SongbookError>> + Send;

    /// Overwrite a stored song. Returns `None` when no row has that id.
    fn update(&self, song: Song)
    -> impl Future<Output = Result<Option<Song>, SongbookError>> + Send;

    /// Delete a song. Returns whether a row was removed.
    fn delete(&self, id: SongId) -> impl Future<Output = Result<bool, SongbookError>> + Send;
}

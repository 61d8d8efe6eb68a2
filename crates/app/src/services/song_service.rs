//! Song service: use-cases for managing songs.

use songbook_domain::error::{FieldError, NotFoundError, SongbookError, ValidationErrors};
use songbook_domain::id::{ArtistId, SongId};
use songbook_domain::song::{NewSong, Song, SongPatch};

use crate::ports::{ArtistRepository, SongRepository};

/// Application service for song CRUD operations.
///
/// Holds an artist repository so that a song can never be written with a
/// reference to an artist that does not exist.
pub struct SongService<SR, AR> {
    songs: SR,
    artists: AR,
}

impl<SR: SongRepository, AR: ArtistRepository> SongService<SR, AR> {
    /// Create a new service backed by the given repositories.
    pub fn new(songs: SR, artists: AR) -> Self {
        Self { songs, artists }
    }

    /// Create a new song after validating its fields and its artist.
    ///
    /// # Errors
    ///
    /// Returns [`SongbookError::Validation`] if invariants fail or the
    /// artist does not exist, or a storage error from the repository.
    #[tracing::instrument(skip(self, song), fields(song_title = %song.title, artist_id = %song.artist_id))]
    pub async fn create_song(&self, song: NewSong) -> Result<Song, SongbookError> {
        song.validate()?;
        self.ensure_artist_exists(song.artist_id).await?;
        let song = self.songs.create(song).await?;
        tracing::debug!(song_id = %song.id, "song created");
        Ok(song)
    }

    /// Look up a song by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`SongbookError::NotFound`] when no song with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_song(&self, id: SongId) -> Result<Song, SongbookError> {
        self.songs.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// List all songs.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_songs(&self) -> Result<Vec<Song>, SongbookError> {
        self.songs.get_all().await
    }

    /// Apply `patch` to an existing song and persist the result.
    ///
    /// # Errors
    ///
    /// Returns [`SongbookError::NotFound`] when the song is missing,
    /// [`SongbookError::Validation`] if the patched song breaks an invariant
    /// or points at a missing artist, or a storage error.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_song(&self, id: SongId, patch: SongPatch) -> Result<Song, SongbookError> {
        let mut song = self.get_song(id).await?;
        let moved_to = patch.artist_id;
        song.apply(patch);
        song.validate()?;
        if let Some(artist_id) = moved_to {
            self.ensure_artist_exists(artist_id).await?;
        }
        self.songs.update(song).await?.ok_or_else(|| not_found(id))
    }

    /// Delete a song by id.
    ///
    /// # Errors
    ///
    /// Returns [`SongbookError::NotFound`] when no song with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_song(&self, id: SongId) -> Result<(), SongbookError> {
        if self.songs.delete(id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    async fn ensure_artist_exists(&self, artist_id: ArtistId) -> Result<(), SongbookError> {
        match self.artists.get_by_id(artist_id).await? {
            Some(_) => Ok(()),
            None => Err(ValidationErrors::single(
                "artist",
                FieldError::DoesNotExist(artist_id.get()),
            )
            .into()),
        }
    }
}

fn not_found(id: SongId) -> SongbookError {
    NotFoundError {
        entity: "Song",
        id: id.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::{InMemory, InMemoryArtistRepo, InMemorySongRepo};
    use songbook_domain::artist::NewArtist;

    struct Fixture {
        store: InMemory,
        svc: SongService<InMemorySongRepo, InMemoryArtistRepo>,
        artist: ArtistId,
    }

    async fn fixture() -> Fixture {
        let store = InMemory::default();
        let artist = store
            .artists()
            .create(
                NewArtist::builder()
                    .name("Funkadelic")
                    .nationality("USA")
                    .photo_url("https://example.com/funkadelic.jpg")
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap()
            .id;
        let svc = SongService::new(store.songs(), store.artists());
        Fixture { store, svc, artist }
    }

    fn maggot_brain(artist_id: ArtistId) -> NewSong {
        NewSong::builder()
            .title("Maggot Brain")
            .album("Maggot Brain")
            .preview_url("https://example.com/maggot-brain.mp3")
            .artist_id(artist_id)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_song_when_artist_exists() {
        let f = fixture().await;

        let created = f.svc.create_song(maggot_brain(f.artist)).await.unwrap();
        let fetched = f.svc.get_song(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.artist_id, f.artist);
    }

    #[tokio::test]
    async fn should_reject_song_for_unknown_artist() {
        let f = fixture().await;
        let ghost = ArtistId::new(404).unwrap();

        let Err(SongbookError::Validation(errors)) = f.svc.create_song(maggot_brain(ghost)).await
        else {
            panic!("expected a validation error");
        };
        assert_eq!(
            errors.get("artist"),
            Some([FieldError::DoesNotExist(404)].as_slice())
        );
        assert_eq!(f.store.song_count(), 0);
    }

    #[tokio::test]
    async fn should_list_songs_in_id_order() {
        let f = fixture().await;
        let first = f.svc.create_song(maggot_brain(f.artist)).await.unwrap();
        let second = f.svc.create_song(maggot_brain(f.artist)).await.unwrap();

        let all = f.svc.list_songs().await.unwrap();
        let ids: Vec<SongId> = all.iter().map(|song| song.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn should_reject_moving_song_to_unknown_artist() {
        let f = fixture().await;
        let song = f.svc.create_song(maggot_brain(f.artist)).await.unwrap();

        let result = f
            .svc
            .update_song(
                song.id,
                SongPatch {
                    artist_id: Some(ArtistId::new(77).unwrap()),
                    ..SongPatch::default()
                },
            )
            .await;
        assert!(matches!(result, Err(SongbookError::Validation(_))));
        assert_eq!(f.svc.get_song(song.id).await.unwrap().artist_id, f.artist);
    }

    #[tokio::test]
    async fn should_patch_title_only() {
        let f = fixture().await;
        let song = f.svc.create_song(maggot_brain(f.artist)).await.unwrap();

        let updated = f
            .svc
            .update_song(
                song.id,
                SongPatch {
                    title: Some("Can You Get to That".to_string()),
                    ..SongPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Can You Get to That");
        assert_eq!(updated.album, "Maggot Brain");
    }

    #[tokio::test]
    async fn should_return_not_found_for_missing_song() {
        let f = fixture().await;
        let missing = SongId::new(12).unwrap();
        assert!(matches!(
            f.svc.get_song(missing).await,
            Err(SongbookError::NotFound(_))
        ));
        assert!(matches!(
            f.svc.update_song(missing, SongPatch::default()).await,
            Err(SongbookError::NotFound(_))
        ));
        assert!(matches!(
            f.svc.delete_song(missing).await,
            Err(SongbookError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn should_delete_song_once() {
        let f = fixture().await;
        let song = f.svc.create_song(maggot_brain(f.artist)).await.unwrap();

        f.svc.delete_song(song.id).await.unwrap();
        assert!(matches!(
            f.svc.delete_song(song.id).await,
            Err(SongbookError::NotFound(_))
        ));
    }
}

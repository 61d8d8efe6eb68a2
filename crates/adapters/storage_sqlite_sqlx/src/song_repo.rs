//! `SQLite` implementation of [`SongRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use songbook_app::ports::SongRepository;
use songbook_domain::error::{FieldError, SongbookError, ValidationErrors};
use songbook_domain::id::{ArtistId, SongId};
use songbook_domain::song::{NewSong, Song};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Song`].
struct Wrapper(Song);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Song> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let title: String = row.try_get("title")?;
        let album: String = row.try_get("album")?;
        let preview_url: String = row.try_get("preview_url")?;
        let artist_id: i64 = row.try_get("artist_id")?;

        let id = SongId::try_from(id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let artist_id =
            ArtistId::try_from(artist_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Song {
            id,
            title,
            album,
            preview_url,
            artist_id,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO songs (title, album, preview_url, artist_id) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM songs WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM songs ORDER BY id";
const SELECT_BY_ARTIST: &str = "SELECT * FROM songs WHERE artist_id = ? ORDER BY id";
const UPDATE: &str =
    "UPDATE songs SET title = ?, album = ?, preview_url = ?, artist_id = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM songs WHERE id = ?";

/// A dangling artist reference rejected by the store surfaces as a field
/// error, the same way the service layer reports it.
fn map_write_error(err: sqlx::Error, artist_id: ArtistId) -> SongbookError {
    let err = StorageError::from(err);
    if err.is_foreign_key_violation() {
        ValidationErrors::single("artist", FieldError::DoesNotExist(artist_id.get())).into()
    } else {
        err.into()
    }
}

/// `SQLite`-backed song repository.
pub struct SqliteSongRepository {
    pool: SqlitePool,
}

impl SqliteSongRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SongRepository for SqliteSongRepository {
    fn create(&self, song: NewSong) -> impl Future<Output = Result<Song, SongbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&song.title)
                .bind(&song.album)
                .bind(&song.preview_url)
                .bind(song.artist_id.get())
                .execute(&pool)
                .await
                .map_err(|err| map_write_error(err, song.artist_id))?;

            let id = SongId::try_from(result.last_insert_rowid())
                .map_err(|err| StorageError::from(sqlx::Error::Decode(Box::new(err))))?;
            Ok(song.into_song(id))
        }
    }

    fn get_by_id(
        &self,
        id: SongId,
    ) -> impl Future<Output = Result<Option<Song>, SongbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Song>, SongbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_artist(
        &self,
        artist_id: ArtistId,
    ) -> impl Future<Output = Result<Vec<Song>, SongbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_ARTIST)
                .bind(artist_id.get())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        song: Song,
    ) -> impl Future<Output = Result<Option<Song>, SongbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&song.title)
                .bind(&song.album)
                .bind(&song.preview_url)
                .bind(song.artist_id.get())
                .bind(song.id.get())
                .execute(&pool)
                .await
                .map_err(|err| map_write_error(err, song.artist_id))?;

            Ok((result.rows_affected() > 0).then_some(song))
        }
    }

    fn delete(&self, id: SongId) -> impl Future<Output = Result<bool, SongbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}

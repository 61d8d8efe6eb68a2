//! `SQLite` implementation of [`ArtistRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use songbook_app::ports::ArtistRepository;
use songbook_domain::artist::{Artist, NewArtist};
use songbook_domain::error::SongbookError;
use songbook_domain::id::ArtistId;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Artist`].
struct Wrapper(Artist);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Artist> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let nationality: String = row.try_get("nationality")?;
        let photo_url: String = row.try_get("photo_url")?;

        let id = ArtistId::try_from(id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Artist {
            id,
            name,
            nationality,
            photo_url,
        }))
    }
}

const INSERT: &str = "INSERT INTO artists (name, nationality, photo_url) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM artists WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM artists ORDER BY id";
const UPDATE: &str = "UPDATE artists SET name = ?, nationality = ?, photo_url = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM artists WHERE id = ?";

/// `SQLite`-backed artist repository.
pub struct SqliteArtistRepository {
    pool: SqlitePool,
}

impl SqliteArtistRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ArtistRepository for SqliteArtistRepository {
    fn create(
        &self,
        artist: NewArtist,
    ) -> impl Future<Output = Result<Artist, SongbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&artist.name)
                .bind(&artist.nationality)
                .bind(&artist.photo_url)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            let id = ArtistId::try_from(result.last_insert_rowid())
                .map_err(|err| StorageError::from(sqlx::Error::Decode(Box::new(err))))?;
            Ok(artist.into_artist(id))
        }
    }

    fn get_by_id(
        &self,
        id: ArtistId,
    ) -> impl Future<Output = Result<Option<Artist>, SongbookError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Artist>, SongbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        artist: Artist,
    ) -> impl Future<Output = Result<Option<Artist>, SongbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&artist.name)
                .bind(&artist.nationality)
                .bind(&artist.photo_url)
                .bind(artist.id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok((result.rows_affected() > 0).then_some(artist))
        }
    }

    fn delete(&self, id: ArtistId) -> impl Future<Output = Result<bool, SongbookError>> + Send {
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

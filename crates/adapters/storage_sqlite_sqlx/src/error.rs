//! Storage-specific error type wrapping sqlx errors.

use songbook_domain::error::SongbookError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StorageError {
    /// Whether the failure is a rejected foreign key.
    #[must_use]
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            Self::Database(err) => err
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation()),
            Self::Migration(_) => false,
        }
    }
}

impl From<StorageError> for SongbookError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

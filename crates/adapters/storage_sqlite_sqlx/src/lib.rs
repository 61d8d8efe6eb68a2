//! # songbook-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `songbook-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Enforce referential integrity between songs and artists
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `songbook-app` (for port traits) and `songbook-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod artist_repo;
mod error;
mod pool;
mod song_repo;

pub use artist_repo::SqliteArtistRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use song_repo::SqliteSongRepository;

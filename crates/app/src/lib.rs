//! # songbook-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ArtistRepository`: CRUD for artists
//!   - `SongRepository`: CRUD for songs, plus lookup by owning artist
//!   - `Authenticator`: resolve a presented token to a principal
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ArtistService`: create, list, get, update, delete artists
//!   - `SongService`: same for songs, enforcing that the artist exists
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (a static token table authenticator)
//!
//! ## Dependency rule
//! Depends on `songbook-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod static_auth;

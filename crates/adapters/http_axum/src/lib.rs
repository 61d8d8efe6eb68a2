//! # songbook-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **hyperlinked JSON API** for artists and songs
//!   (`/api/artists/`, `/api/songs/{id}`, …)
//! - Resolve the `Authorization` header to a requester and enforce the
//!   configured access policy before every mutation
//! - Map JSON payloads into domain records, reporting every failing field
//! - Map application results into HTTP responses with hyperlinked relations
//!
//! ## Dependency rule
//! Depends on `songbook-app` (for port traits and services) and
//! `songbook-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod extract;
pub mod router;
pub mod routes;
pub mod serializer;
pub mod state;

//! # songbook-domain
//!
//! Pure domain model for the songbook music catalogue API.
//!
//! ## Responsibilities
//! - Foundational types: typed integer identifiers, error conventions
//! - Define **Artists** and the **Songs** they own (one-to-many)
//! - Define drafts (records without an id yet) and patches (partial updates)
//! - Enforce field constraints (required, blank, length, URL shape)
//! - Define the **access policy** deciding who may read or mutate what
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod access;
pub mod error;
pub mod field;
pub mod id;

pub mod artist;
pub mod song;

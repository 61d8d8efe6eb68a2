//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod artist_service;
pub mod song_service;

#[cfg(test)]
pub(crate) mod memory;

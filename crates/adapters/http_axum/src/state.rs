//! Shared application state for axum handlers.

use std::sync::Arc;

use url::Url;

use songbook_app::ports::{ArtistRepository, Authenticator, SongRepository};
use songbook_app::services::artist_service::ArtistService;
use songbook_app::services::song_service::SongService;
use songbook_domain::access::AccessPolicy;

use crate::routes::Links;
use crate::serializer::UnknownFields;

/// Request-independent API behaviour, set once at startup.
#[derive(Debug, Clone, Default)]
pub struct ApiSettings {
    /// Which requesters may mutate which resources.
    pub policy: AccessPolicy,
    /// How undeclared payload keys are treated.
    pub unknown_fields: UnknownFields,
    /// Base for absolute hyperlinks. Links are server-relative when unset.
    pub public_url: Option<Url>,
}

/// Application state shared across all axum handlers.
///
/// Generic over the repository and authenticator types to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<AR, SR, AU> {
    /// Artist CRUD service.
    pub artist_service: Arc<ArtistService<AR, SR>>,
    /// Song CRUD service.
    pub song_service: Arc<SongService<SR, AR>>,
    /// Resolves bearer tokens to principals.
    pub authenticator: Arc<AU>,
    pub policy: AccessPolicy,
    pub unknown_fields: UnknownFields,
    pub links: Arc<Links>,
}

impl<AR, SR, AU> Clone for AppState<AR, SR, AU> {
    fn clone(&self) -> Self {
        Self {
            artist_service: Arc::clone(&self.artist_service),
            song_service: Arc::clone(&self.song_service),
            authenticator: Arc::clone(&self.authenticator),
            policy: self.policy,
            unknown_fields: self.unknown_fields,
            links: Arc::clone(&self.links),
        }
    }
}

impl<AR, SR, AU> AppState<AR, SR, AU>
where
    AR: ArtistRepository + Send + Sync + 'static,
    SR: SongRepository + Send + Sync + 'static,
    AU: Authenticator + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        artist_service: ArtistService<AR, SR>,
        song_service: SongService<SR, AR>,
        authenticator: AU,
        settings: ApiSettings,
    ) -> Self {
        Self {
            artist_service: Arc::new(artist_service),
            song_service: Arc::new(song_service),
            authenticator: Arc::new(authenticator),
            policy: settings.policy,
            unknown_fields: settings.unknown_fields,
            links: Arc::new(Links::new(settings.public_url)),
        }
    }
}

//! Named route table and hyperlink building.
//!
//! The same patterns are used to register handlers on the router and to
//! reverse a [`Route`] into the URL a client should follow, so links can
//! never drift from what the router actually serves.

use std::fmt;

use url::Url;

use songbook_domain::id::{ArtistId, SongId};

/// Mount point of the JSON API.
pub const API_PREFIX: &str = "/api";

/// Collection pattern for artists.
pub const ARTIST_LIST: &str = "/artists/";
/// Item pattern for artists. `{id}` only accepts positive integers.
pub const ARTIST_DETAIL: &str = "/artists/{id}";
/// Collection pattern for songs.
pub const SONG_LIST: &str = "/songs/";
/// Item pattern for songs. `{id}` only accepts positive integers.
pub const SONG_DETAIL: &str = "/songs/{id}";

/// A concrete, reversible API location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ArtistList,
    ArtistDetail(ArtistId),
    SongList,
    SongDetail(SongId),
}

impl Route {
    /// Stable route name used for reverse lookup.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ArtistList => "artist-list",
            Self::ArtistDetail(_) => "artist-detail",
            Self::SongList => "song-list",
            Self::SongDetail(_) => "song-detail",
        }
    }

    /// Look a route up by name, filling in `id` for item routes.
    ///
    /// Returns `None` for an unknown name, a missing id on an item route,
    /// an id on a collection route, or a non-positive id.
    #[must_use]
    pub fn reverse(name: &str, id: Option<i64>) -> Option<Self> {
        match (name, id) {
            ("artist-list", None) => Some(Self::ArtistList),
            ("song-list", None) => Some(Self::SongList),
            ("artist-detail", Some(id)) => ArtistId::new(id).map(Self::ArtistDetail),
            ("song-detail", Some(id)) => SongId::new(id).map(Self::SongDetail),
            _ => None,
        }
    }

    /// The pattern this route was registered under.
    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            Self::ArtistList => ARTIST_LIST,
            Self::ArtistDetail(_) => ARTIST_DETAIL,
            Self::SongList => SONG_LIST,
            Self::SongDetail(_) => SONG_DETAIL,
        }
    }

    /// Absolute path on this server, including [`API_PREFIX`].
    #[must_use]
    pub fn path(self) -> String {
        let pattern = self.pattern();
        let path = match self {
            Self::ArtistList | Self::SongList => pattern.to_string(),
            Self::ArtistDetail(id) => pattern.replace("{id}", &id.to_string()),
            Self::SongDetail(id) => pattern.replace("{id}", &id.to_string()),
        };
        format!("{API_PREFIX}{path}")
    }

    /// Match a server path (with [`API_PREFIX`]) back to a route.
    ///
    /// Accepts exactly the paths the router serves: collection paths end
    /// with a slash, item paths do not.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let rest = path.strip_prefix(API_PREFIX)?.strip_prefix('/')?;
        let (resource, id) = rest.split_once('/')?;
        let route = match (resource, id) {
            ("artists", "") => Self::ArtistList,
            ("songs", "") => Self::SongList,
            ("artists", id) => Self::ArtistDetail(id.parse().ok()?),
            ("songs", id) => Self::SongDetail(id.parse().ok()?),
            _ => return None,
        };
        Some(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Turns routes into hyperlinks and hyperlinks back into routes.
///
/// Links are relative paths unless a public base URL is configured.
#[derive(Debug, Clone, Default)]
pub struct Links {
    base: Option<Url>,
}

impl Links {
    #[must_use]
    pub fn new(base: Option<Url>) -> Self {
        Self { base }
    }

    /// Hyperlink for `route`.
    #[must_use]
    pub fn href(&self, route: Route) -> String {
        match &self.base {
            Some(base) => format!("{}{}", base.as_str().trim_end_matches('/'), route.path()),
            None => route.path(),
        }
    }

    #[must_use]
    pub fn artist(&self, id: ArtistId) -> String {
        self.href(Route::ArtistDetail(id))
    }

    #[must_use]
    pub fn song(&self, id: SongId) -> String {
        self.href(Route::SongDetail(id))
    }

    /// Resolve a hyperlink (absolute URL or server path) to a route.
    ///
    /// Only the path is matched; the host of an absolute URL is not
    /// compared. The base URL's own path is stripped when configured.
    #[must_use]
    pub fn resolve(&self, href: &str) -> Option<Route> {
        if href.starts_with('/') {
            return Route::from_path(href);
        }
        let url = Url::parse(href).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        let mut path = url.path();
        if let Some(base) = &self.base {
            let base_path = base.path().trim_end_matches('/');
            path = path.strip_prefix(base_path).unwrap_or(path);
        }
        Route::from_path(path)
    }
}

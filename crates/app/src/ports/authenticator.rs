//! Authenticator port: resolve presented credentials to a principal.

use std::future::Future;

use songbook_domain::access::Principal;
use songbook_domain::error::SongbookError;

/// Resolves an API token to the [`Principal`] it belongs to.
pub trait Authenticator {
    /// Look up `token`. Returns `None` when the token is unknown.
    fn authenticate(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<Principal>, SongbookError>> + Send;
}

impl<T: Authenticator + Send + Sync> Authenticator for std::sync::Arc<T> {
    fn authenticate(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<Principal>, SongbookError>> + Send {
        (**self).authenticate(token)
    }
}

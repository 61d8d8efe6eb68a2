//! In-process authenticator backed by a fixed token table.

use std::collections::HashMap;
use std::future::Future;

use songbook_domain::access::Principal;
use songbook_domain::error::SongbookError;

use crate::ports::Authenticator;

/// Token table loaded once at startup and never mutated.
#[derive(Debug, Default)]
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, Principal>,
}

impl StaticTokenAuthenticator {
    /// Build the table from `(token, principal)` pairs.
    ///
    /// A later duplicate token replaces an earlier one; configuration
    /// loading rejects duplicates before this point.
    pub fn new(entries: impl IntoIterator<Item = (String, Principal)>) -> Self {
        Self {
            tokens: entries.into_iter().collect(),
        }
    }

    /// Number of registered tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Authenticator for StaticTokenAuthenticator {
    fn authenticate(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<Principal>, SongbookError>> + Send {
        let principal = self.tokens.get(token).cloned();
        async { Ok(principal) }
    }
}

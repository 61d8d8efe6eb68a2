//! Access policy: who may read or mutate which resource.
//!
//! A single [`AccessPolicy`] is chosen at startup and consulted before
//! every request. [`Action::View`] is open to everyone under every policy.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The record type an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Model {
    Artist,
    Song,
}

impl Model {
    /// Plural resource name used in permission strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Artist => "artists",
            Self::Song => "songs",
        }
    }
}

/// What the requester wants to do with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    View,
    Add,
    Change,
    Delete,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Add => "add",
            Self::Change => "change",
            Self::Delete => "delete",
        }
    }

    /// Reads never change state.
    #[must_use]
    pub fn is_safe(self) -> bool {
        matches!(self, Self::View)
    }
}

/// A `<model>.<action>` permission such as `songs.add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Permission {
    pub model: Model,
    pub action: Action,
}

impl Permission {
    #[must_use]
    pub fn new(model: Model, action: Action) -> Self {
        Self { model, action }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.model.as_str(), self.action.as_str())
    }
}

/// Failure to parse a permission string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid permission {0:?}, expected `<artists|songs>.<view|add|change|delete>`")]
pub struct ParsePermissionError(String);

impl FromStr for Permission {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParsePermissionError(s.to_string());
        let (model, action) = s.split_once('.').ok_or_else(invalid)?;
        let model = match model {
            "artists" => Model::Artist,
            "songs" => Model::Song,
            _ => return Err(invalid()),
        };
        let action = match action {
            "view" => Action::View,
            "add" => Action::Add,
            "change" => Action::Change,
            "delete" => Action::Delete,
            _ => return Err(invalid()),
        };
        Ok(Self { model, action })
    }
}

/// An authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub superuser: bool,
    pub permissions: BTreeSet<Permission>,
}

impl Principal {
    /// Superusers implicitly hold every permission.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.superuser || self.permissions.contains(&permission)
    }
}

/// Who is making the request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Requester {
    #[default]
    Anonymous,
    Authenticated(Principal),
}

impl Requester {
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(principal) => Some(principal),
        }
    }
}

/// Rejections produced by authentication and the access policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// A mutating action was attempted without credentials.
    #[error("authentication credentials were not provided")]
    NotAuthenticated,

    /// Credentials were supplied but are malformed or unknown.
    #[error("invalid token")]
    InvalidCredentials,

    /// The principal lacks the permission for this action.
    #[error("{username} does not have the {permission} permission")]
    PermissionDenied {
        username: String,
        permission: Permission,
    },
}

/// Process-wide rule evaluated before every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessPolicy {
    /// Mutations need the matching model permission.
    #[default]
    ModelPermissionsOrAnonReadOnly,
    /// Any authenticated principal may mutate.
    AuthenticatedOrReadOnly,
}

impl AccessPolicy {
    /// Decide whether `requester` may perform `action` on `model`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotAuthenticated`] for anonymous mutations and
    /// [`AccessError::PermissionDenied`] when the principal lacks the
    /// required permission.
    pub fn check(
        self,
        requester: &Requester,
        model: Model,
        action: Action,
    ) -> Result<(), AccessError> {
        if action.is_safe() {
            return Ok(());
        }
        let Some(principal) = requester.principal() else {
            return Err(AccessError::NotAuthenticated);
        };
        match self {
            Self::AuthenticatedOrReadOnly => Ok(()),
            Self::ModelPermissionsOrAnonReadOnly => {
                let permission = Permission::new(model, action);
                if principal.has_permission(permission) {
                    Ok(())
                } else {
                    Err(AccessError::PermissionDenied {
                        username: principal.username.clone(),
                        permission,
                    })
                }
            }
        }
    }
}

//! User model as seen by the API key subsystem.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// User stored in database.
///
/// `api_key` holds the salted hash of the user's bearer secret, never the
/// secret itself.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub is_active: bool,
    pub api_key: Option<String>,
}

impl User {
    /// Build an active user with no API key.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            is_active: true,
            api_key: None,
        }
    }

    /// The stored key hash, if one is provisioned.
    pub fn api_key_hash(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Whether this user may authenticate with a bearer token at all.
    pub fn can_use_api_key(&self) -> bool {
        self.is_active && self.api_key_hash().is_some()
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("is_active", &self.is_active)
            .field("api_key", &self.api_key_hash().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Identity response (returned by /me).
#[derive(Debug, Serialize, ToSchema)]
pub struct IdentityResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// How the identity was established: `session` or `bearer`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

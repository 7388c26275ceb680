//! API key lifecycle: generation and revocation of a user's bearer credential.
//!
//! Each user has at most one key. Only its salted hash is stored; the raw
//! secret leaves this module exactly once, inside the `username:secret`
//! display token returned by [`KeyLifecycleManager::generate`].

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::auth::CredentialHasher;
use crate::db::UserRepository;
use crate::error::AppResult;
use crate::models::User;

/// Issues and revokes API keys.
#[derive(Clone)]
pub struct KeyLifecycleManager {
    users: Arc<dyn UserRepository>,
    hasher: CredentialHasher,
}

impl KeyLifecycleManager {
    pub fn new(users: Arc<dyn UserRepository>, hasher: CredentialHasher) -> Self {
        Self { users, hasher }
    }

    /// Issue a new key for `user`, replacing any previous one.
    ///
    /// Returns the display token `username:secret`.
    pub async fn generate(&self, user: &User) -> AppResult<SecretString> {
        let secret = CredentialHasher::generate_secret();
        let salt = CredentialHasher::generate_salt();
        let hash = self.hasher.encode(secret.expose_secret(), &salt)?;

        self.users.set_api_key(user.id, Some(hash)).await?;
        info!(username = %user.username, "API key generated");

        Ok(SecretString::from(format!(
            "{}:{}",
            user.username,
            secret.expose_secret()
        )))
    }

    /// Remove `user`'s key. Revoking when no key exists succeeds.
    pub async fn revoke(&self, user: &User) -> AppResult<()> {
        self.users.set_api_key(user.id, None).await?;
        info!(username = %user.username, "API key revoked");
        Ok(())
    }
}

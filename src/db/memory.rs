//! In-process user repository.
//!
//! Backs the integration tests and local tooling. Writes go through a single
//! write lock, matching the single-statement semantics of the SQL version.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use super::UserRepository;
use crate::error::{AppError, AppResult};
use crate::models::User;

#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user.
    pub fn insert(&self, user: User) -> AppResult<()> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        users.insert(user.id, user);
        Ok(())
    }

    /// Synchronous lookup by username.
    pub fn get(&self, username: &str) -> Option<User> {
        let users = self.users.read().ok()?;
        users.values().find(|u| u.username == username).cloned()
    }

    /// Flip the active flag of a user.
    pub fn set_active(&self, username: &str, is_active: bool) -> AppResult<()> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        let user = users
            .values_mut()
            .find(|u| u.username == username)
            .ok_or_else(|| AppError::NotFound(format!("User {}", username)))?;
        user.is_active = is_active;
        Ok(())
    }
}

fn poisoned() -> AppError {
    AppError::Database("user store lock poisoned".to_string())
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn set_api_key(&self, user_id: Uuid, api_key: Option<String>) -> AppResult<()> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))?;
        user.api_key = api_key;
        Ok(())
    }
}

//! Database module providing connection management, migrations, and the user
//! repository used by API key authentication.

pub mod memory;
pub mod users;

use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppResult;
use crate::migration::Migrator;
use crate::models::User;

pub use memory::MemoryUserRepository;

/// Storage contract for API key authentication and management.
///
/// `set_api_key` must write only the `api_key` column in a single statement
/// so concurrent generate/revoke calls resolve as last-writer-wins.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Replace (or clear, with `None`) the stored API key hash.
    async fn set_api_key(&self, user_id: Uuid, api_key: Option<String>) -> AppResult<()>;
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect using the configured database URL.
    pub async fn new(config: &Config) -> AppResult<Self> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(config.db_max_connections)
            .sqlx_logging(false);

        let conn = Database::connect(options).await?;
        Ok(DbPool { conn })
    }

    /// Get access to the connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply all pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None).await?;
        Ok(())
    }
}

//! Migration: Add api_key column to users.
//!
//! Holds `pbkdf2_sha256$<iterations>$<salt>$<digest>`, NULL when no key is
//! provisioned.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE users ADD COLUMN api_key VARCHAR(128) NULL DEFAULT NULL;",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("ALTER TABLE users DROP COLUMN IF EXISTS api_key;")
            .await?;

        Ok(())
    }
}

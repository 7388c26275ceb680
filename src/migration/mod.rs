//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20201201_000001_create_users;
mod m20201201_000002_add_users_api_key;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20201201_000001_create_users::Migration),
            Box::new(m20201201_000002_add_users_api_key::Migration),
        ]
    }
}

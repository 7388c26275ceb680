//! Database operations for users using SeaORM.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

use super::{DbPool, UserRepository};
use crate::entity::user::{Column, Entity};
use crate::error::{AppError, AppResult};
use crate::models::User;

/// Find a user by username.
pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> AppResult<Option<User>> {
    let result = Entity::find()
        .filter(Column::Username.eq(username))
        .one(db)
        .await?;

    Ok(result.map(model_to_user))
}

/// Overwrite the api_key column of one user.
///
/// Issued as a single `UPDATE users SET api_key = $1 WHERE id = $2`, touching
/// no other column.
pub async fn update_api_key(
    db: &DatabaseConnection,
    user_id: Uuid,
    api_key: Option<String>,
) -> AppResult<()> {
    let result = Entity::update_many()
        .col_expr(Column::ApiKey, Expr::value(api_key))
        .filter(Column::Id.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("User {}", user_id)));
    }

    Ok(())
}

fn model_to_user(m: crate::entity::user::Model) -> User {
    User {
        id: m.id,
        username: m.username,
        is_active: m.is_active,
        api_key: m.api_key,
    }
}

#[async_trait]
impl UserRepository for DbPool {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        find_by_username(self.connection(), username).await
    }

    async fn set_api_key(&self, user_id: Uuid, api_key: Option<String>) -> AppResult<()> {
        update_api_key(self.connection(), user_id, api_key).await
    }
}

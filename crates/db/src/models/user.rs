//! User row model.

use grimoire_core::types::{DbId, Timestamp};
use grimoire_core::users::User;
use sqlx::FromRow;

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

//! Repository for the `users` table.

use sqlx::PgPool;

use grimoire_core::types::DbId;

use crate::models::user::UserRow;

const COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

/// Provides user creation and lookup.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user. A duplicate email fails on `uq_users_email`.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}

//! Repository for the `notes` table.

use sqlx::PgPool;

use grimoire_core::types::DbId;

use crate::models::note::NoteRow;

const COLUMNS: &str = "id, user_id, title, content, created_at, updated_at";

/// Provides CRUD operations for notes, always scoped to an owner.
pub struct NoteRepo;

impl NoteRepo {
    /// List a user's notes, most recently updated first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<NoteRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes WHERE user_id = $1 \
             ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<NoteRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        title: &str,
        content: &str,
    ) -> Result<NoteRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (user_id, title, content) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(user_id)
            .bind(title)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        title: &str,
        content: &str,
    ) -> Result<Option<NoteRow>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET title = $3, content = $4, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .bind(user_id)
            .bind(title)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned note. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

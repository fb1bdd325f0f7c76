//! Note row model.

use grimoire_core::notes::Note;
use grimoire_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A note row from the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

//! In-process implementation of the core store traits.
//!
//! Backs the server when `STORAGE_BACKEND=memory` and the integration tests.
//! Ids are assigned from per-table counters starting at 1. Contents are lost
//! when the process exits.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use grimoire_core::character::{Character, CharacterSheet};
use grimoire_core::error::CoreError;
use grimoire_core::notes::{Note, NoteFields};
use grimoire_core::store::{CharacterStore, NoteStore, UserStore};
use grimoire_core::types::DbId;
use grimoire_core::users::{NewUser, User};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<DbId, User>,
    characters: BTreeMap<DbId, Character>,
    notes: BTreeMap<DbId, Note>,
    last_user_id: DbId,
    last_character_id: DbId,
    last_note_id: DbId,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterStore for MemoryStore {
    async fn find_all_for_user(&self, user_id: DbId) -> Result<Vec<Character>, CoreError> {
        let tables = self.tables.read().await;
        // BTreeMap iteration is already id-ascending.
        Ok(tables
            .characters
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_one(&self, id: DbId, user_id: DbId) -> Result<Option<Character>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .characters
            .get(&id)
            .filter(|c| c.user_id == user_id)
            .cloned())
    }

    async fn create(&self, user_id: DbId, sheet: &CharacterSheet) -> Result<Character, CoreError> {
        let mut tables = self.tables.write().await;
        tables.last_character_id += 1;
        let now = Utc::now();
        let character = Character {
            id: tables.last_character_id,
            user_id,
            sheet: sheet.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.characters.insert(character.id, character.clone());
        Ok(character)
    }

    async fn update(
        &self,
        id: DbId,
        user_id: DbId,
        sheet: &CharacterSheet,
    ) -> Result<Option<Character>, CoreError> {
        let mut tables = self.tables.write().await;
        let Some(character) = tables
            .characters
            .get_mut(&id)
            .filter(|c| c.user_id == user_id)
        else {
            return Ok(None);
        };
        character.sheet = sheet.clone();
        character.updated_at = Utc::now();
        Ok(Some(character.clone()))
    }

    async fn delete(&self, id: DbId, user_id: DbId) -> Result<bool, CoreError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .characters
            .get(&id)
            .is_some_and(|c| c.user_id == user_id);
        if owned {
            tables.characters.remove(&id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn find_all_for_user(&self, user_id: DbId) -> Result<Vec<Note>, CoreError> {
        let tables = self.tables.read().await;
        let mut notes: Vec<Note> = tables
            .notes
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(notes)
    }

    async fn find_one(&self, id: DbId, user_id: DbId) -> Result<Option<Note>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .get(&id)
            .filter(|n| n.user_id == user_id)
            .cloned())
    }

    async fn create(&self, user_id: DbId, fields: &NoteFields) -> Result<Note, CoreError> {
        let mut tables = self.tables.write().await;
        tables.last_note_id += 1;
        let now = Utc::now();
        let note = Note {
            id: tables.last_note_id,
            user_id,
            title: fields.title.clone(),
            content: fields.content.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn update(
        &self,
        id: DbId,
        user_id: DbId,
        fields: &NoteFields,
    ) -> Result<Option<Note>, CoreError> {
        let mut tables = self.tables.write().await;
        let Some(note) = tables.notes.get_mut(&id).filter(|n| n.user_id == user_id) else {
            return Ok(None);
        };
        note.title = fields.title.clone();
        note.content = fields.content.clone();
        note.updated_at = Utc::now();
        Ok(Some(note.clone()))
    }

    async fn delete(&self, id: DbId, user_id: DbId) -> Result<bool, CoreError> {
        let mut tables = self.tables.write().await;
        let owned = tables.notes.get(&id).is_some_and(|n| n.user_id == user_id);
        if owned {
            tables.notes.remove(&id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, input: &NewUser) -> Result<User, CoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == input.email) {
            return Err(CoreError::Conflict(
                "Duplicate value violates unique constraint: uq_users_email".into(),
            ));
        }
        tables.last_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: tables.last_user_id,
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, CoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

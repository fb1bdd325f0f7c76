//! Persistence ports.
//!
//! The API layer holds these as trait objects and never knows which backend
//! is active. Every character and note operation is scoped by the owning
//! user: a record that exists under another user is reported exactly like a
//! missing one (`None` / `false`).

use async_trait::async_trait;

use crate::character::{Character, CharacterSheet};
use crate::error::CoreError;
use crate::notes::{Note, NoteFields};
use crate::types::DbId;
use crate::users::{NewUser, User};

#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// All characters owned by `user_id`, ordered by id ascending.
    async fn find_all_for_user(&self, user_id: DbId) -> Result<Vec<Character>, CoreError>;

    async fn find_one(&self, id: DbId, user_id: DbId) -> Result<Option<Character>, CoreError>;

    /// Store a validated sheet under `user_id`, assigning a new id.
    async fn create(&self, user_id: DbId, sheet: &CharacterSheet) -> Result<Character, CoreError>;

    /// Replace the sheet of an owned character.
    async fn update(
        &self,
        id: DbId,
        user_id: DbId,
        sheet: &CharacterSheet,
    ) -> Result<Option<Character>, CoreError>;

    /// Returns `true` if an owned character was removed.
    async fn delete(&self, id: DbId, user_id: DbId) -> Result<bool, CoreError>;
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes owned by `user_id`, most recently updated first.
    async fn find_all_for_user(&self, user_id: DbId) -> Result<Vec<Note>, CoreError>;

    async fn find_one(&self, id: DbId, user_id: DbId) -> Result<Option<Note>, CoreError>;

    async fn create(&self, user_id: DbId, fields: &NoteFields) -> Result<Note, CoreError>;

    async fn update(
        &self,
        id: DbId,
        user_id: DbId,
        fields: &NoteFields,
    ) -> Result<Option<Note>, CoreError>;

    async fn delete(&self, id: DbId, user_id: DbId) -> Result<bool, CoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with [`CoreError::Conflict`] if the email is taken.
    async fn create(&self, input: &NewUser) -> Result<User, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, CoreError>;

    /// Lookup by already-normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError>;
}

//! Postgres-backed implementation of the core store traits.
//!
//! Thin adapter over the repositories: converts rows to domain entities and
//! sqlx errors to [`CoreError`].

use async_trait::async_trait;

use grimoire_core::character::{Character, CharacterSheet};
use grimoire_core::error::CoreError;
use grimoire_core::notes::{Note, NoteFields};
use grimoire_core::store::{CharacterStore, NoteStore, UserStore};
use grimoire_core::types::DbId;
use grimoire_core::users::{NewUser, User};

use crate::error::map_sqlx_error;
use crate::repositories::{CharacterRepo, NoteRepo, UserRepo};
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl CharacterStore for PgStore {
    async fn find_all_for_user(&self, user_id: DbId) -> Result<Vec<Character>, CoreError> {
        CharacterRepo::list_for_user(&self.pool, user_id)
            .await
            .map_err(map_sqlx_error)?
            .into_iter()
            .map(Character::try_from)
            .collect()
    }

    async fn find_one(&self, id: DbId, user_id: DbId) -> Result<Option<Character>, CoreError> {
        CharacterRepo::find_for_user(&self.pool, id, user_id)
            .await
            .map_err(map_sqlx_error)?
            .map(Character::try_from)
            .transpose()
    }

    async fn create(&self, user_id: DbId, sheet: &CharacterSheet) -> Result<Character, CoreError> {
        let row = CharacterRepo::create(&self.pool, user_id, sheet)
            .await
            .map_err(map_sqlx_error)?;
        Character::try_from(row)
    }

    async fn update(
        &self,
        id: DbId,
        user_id: DbId,
        sheet: &CharacterSheet,
    ) -> Result<Option<Character>, CoreError> {
        CharacterRepo::update(&self.pool, id, user_id, sheet)
            .await
            .map_err(map_sqlx_error)?
            .map(Character::try_from)
            .transpose()
    }

    async fn delete(&self, id: DbId, user_id: DbId) -> Result<bool, CoreError> {
        CharacterRepo::delete(&self.pool, id, user_id)
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn find_all_for_user(&self, user_id: DbId) -> Result<Vec<Note>, CoreError> {
        let rows = NoteRepo::list_for_user(&self.pool, user_id)
            .await
            .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn find_one(&self, id: DbId, user_id: DbId) -> Result<Option<Note>, CoreError> {
        let row = NoteRepo::find_for_user(&self.pool, id, user_id)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Note::from))
    }

    async fn create(&self, user_id: DbId, fields: &NoteFields) -> Result<Note, CoreError> {
        let row = NoteRepo::create(&self.pool, user_id, &fields.title, &fields.content)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: DbId,
        user_id: DbId,
        fields: &NoteFields,
    ) -> Result<Option<Note>, CoreError> {
        let row = NoteRepo::update(&self.pool, id, user_id, &fields.title, &fields.content)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Note::from))
    }

    async fn delete(&self, id: DbId, user_id: DbId) -> Result<bool, CoreError> {
        NoteRepo::delete(&self.pool, id, user_id)
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, input: &NewUser) -> Result<User, CoreError> {
        let row = UserRepo::create(
            &self.pool,
            &input.username,
            &input.email,
            &input.password_hash,
        )
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, CoreError> {
        let row = UserRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let row = UserRepo::find_by_email(&self.pool, email)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(User::from))
    }
}

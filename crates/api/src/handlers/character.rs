//! Handlers for the `/characters` resource.
//!
//! Request bodies are taken as raw JSON and run through the character
//! validator, which applies defaults, reports every rule violation, and
//! normalizes proficiency lists before anything is stored.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use grimoire_core::character::Character;
use grimoire_core::error::CoreError;
use grimoire_core::stats::{derive_stats, CharacterStats};
use grimoire_core::types::DbId;
use grimoire_core::validation::{validate_create, validate_update};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/characters
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Character>>> {
    let characters = state.characters.find_all_for_user(auth.user_id).await?;
    Ok(Json(characters))
}

/// POST /api/v1/characters
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<Value>,
) -> AppResult<(StatusCode, Json<Character>)> {
    let sheet = validate_create(&input)?;
    let character = state.characters.create(auth.user_id, &sheet).await?;

    tracing::info!(
        user_id = auth.user_id,
        character_id = character.id,
        "Character created"
    );

    Ok((StatusCode::CREATED, Json(character)))
}

/// GET /api/v1/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Character>> {
    let character = find_owned(&state, id, auth.user_id).await?;
    Ok(Json(character))
}

/// PUT /api/v1/characters/{id}
///
/// Full replace. Omitted fields revert to defaults except `name`.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<Value>,
) -> AppResult<Json<Character>> {
    let existing = find_owned(&state, id, auth.user_id).await?;
    let sheet = validate_update(&input, &existing.sheet)?;

    let character = state
        .characters
        .update(id, auth.user_id, &sheet)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(user_id = auth.user_id, character_id = id, "Character updated");

    Ok(Json(character))
}

/// DELETE /api/v1/characters/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if state.characters.delete(id, auth.user_id).await? {
        tracing::info!(user_id = auth.user_id, character_id = id, "Character deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/characters/{id}/stats
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CharacterStats>> {
    let character = find_owned(&state, id, auth.user_id).await?;
    Ok(Json(derive_stats(&character.sheet)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a character owned by `user_id`; foreign and missing ids are both 404.
pub(crate) async fn find_owned(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Character> {
    state
        .characters
        .find_one(id, user_id)
        .await?
        .ok_or(not_found(id))
}

pub(crate) fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Character",
        id,
    })
}

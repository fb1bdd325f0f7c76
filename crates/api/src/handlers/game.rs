//! Game-mode handlers: in-session hit point and death save changes.
//!
//! Each endpoint loads the owned character, applies one transition to its
//! sheet, and stores the result. Nothing else on the sheet changes.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use grimoire_core::character::Character;
use grimoire_core::death_saves::DeathSaveOutcome;
use grimoire_core::hit_points::{apply_damage, apply_healing};
use grimoire_core::types::DbId;

use crate::error::AppResult;
use crate::handlers::character::{find_owned, not_found};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for damage and healing.
#[derive(Debug, Deserialize, Validate)]
pub struct HitPointChange {
    #[validate(range(min = 0, message = "must be at least 0"))]
    pub amount: i32,
}

/// Request body for `POST /characters/{id}/death-saves`.
#[derive(Debug, Deserialize)]
pub struct DeathSaveRequest {
    pub outcome: DeathSaveOutcome,
}

/// POST /api/v1/characters/{id}/damage
pub async fn damage(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<HitPointChange>,
) -> AppResult<Json<Character>> {
    input.validate()?;
    let mut character = find_owned(&state, id, auth.user_id).await?;

    let sheet = &mut character.sheet;
    sheet.hit_points = apply_damage(sheet.hit_points, input.amount);

    tracing::info!(
        user_id = auth.user_id,
        character_id = id,
        amount = input.amount,
        hit_points = sheet.hit_points,
        "Damage applied"
    );

    save(&state, auth, character).await
}

/// POST /api/v1/characters/{id}/heal
///
/// Healing a character at 0 hit points also clears its death saves.
pub async fn heal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<HitPointChange>,
) -> AppResult<Json<Character>> {
    input.validate()?;
    let mut character = find_owned(&state, id, auth.user_id).await?;

    let sheet = &mut character.sheet;
    let was_down = sheet.hit_points == 0;
    sheet.hit_points = apply_healing(sheet.hit_points, sheet.max_hit_points, input.amount);
    if was_down && sheet.hit_points > 0 {
        let saves = sheet.death_saves().reset();
        sheet.set_death_saves(saves);
    }

    tracing::info!(
        user_id = auth.user_id,
        character_id = id,
        amount = input.amount,
        hit_points = sheet.hit_points,
        "Healing applied"
    );

    save(&state, auth, character).await
}

/// POST /api/v1/characters/{id}/death-saves
pub async fn death_saves(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<DeathSaveRequest>,
) -> AppResult<Json<Character>> {
    let mut character = find_owned(&state, id, auth.user_id).await?;

    let saves = character.sheet.death_saves().record(input.outcome);
    character.sheet.set_death_saves(saves);

    tracing::info!(
        user_id = auth.user_id,
        character_id = id,
        outcome = ?input.outcome,
        successes = saves.successes,
        failures = saves.failures,
        "Death save recorded"
    );

    save(&state, auth, character).await
}

async fn save(state: &AppState, auth: AuthUser, character: Character) -> AppResult<Json<Character>> {
    let updated = state
        .characters
        .update(character.id, auth.user_id, &character.sheet)
        .await?
        .ok_or(not_found(character.id))?;
    Ok(Json(updated))
}

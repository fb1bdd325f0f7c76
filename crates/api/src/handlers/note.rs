//! Handlers for the `/notes` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use grimoire_core::error::CoreError;
use grimoire_core::notes::{validate_note, Note, NoteInput};
use grimoire_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/notes
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Vec<Note>>> {
    let notes = state.notes.find_all_for_user(auth.user_id).await?;
    Ok(Json(notes))
}

/// POST /api/v1/notes
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<NoteInput>,
) -> AppResult<(StatusCode, Json<Note>)> {
    let fields = validate_note(input).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    let note = state.notes.create(auth.user_id, &fields).await?;

    tracing::info!(user_id = auth.user_id, note_id = note.id, "Note created");

    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/v1/notes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Note>> {
    let note = state
        .notes
        .find_one(id, auth.user_id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(note))
}

/// PUT /api/v1/notes/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<NoteInput>,
) -> AppResult<Json<Note>> {
    let fields = validate_note(input).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    let note = state
        .notes
        .update(id, auth.user_id, &fields)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(user_id = auth.user_id, note_id = id, "Note updated");

    Ok(Json(note))
}

/// DELETE /api/v1/notes/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if state.notes.delete(id, auth.user_id).await? {
        tracing::info!(user_id = auth.user_id, note_id = id, "Note deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Note", id })
}

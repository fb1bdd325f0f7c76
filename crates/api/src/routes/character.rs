//! Route definitions for the `/characters` resource and its game-mode actions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{character, game};
use crate::state::AppState;

/// Routes mounted at `/characters`. All require auth.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// GET    /{id}/stats        -> stats
/// POST   /{id}/damage       -> game::damage
/// POST   /{id}/heal         -> game::heal
/// POST   /{id}/death-saves  -> game::death_saves
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(character::list).post(character::create))
        .route(
            "/{id}",
            get(character::get_by_id)
                .put(character::update)
                .delete(character::delete),
        )
        .route("/{id}/stats", get(character::stats))
        .route("/{id}/damage", post(game::damage))
        .route("/{id}/heal", post(game::heal))
        .route("/{id}/death-saves", post(game::death_saves))
}

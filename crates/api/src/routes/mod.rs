pub mod auth;
pub mod character;
pub mod health;
pub mod note;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth                                  register, login, me
/// /characters                            list, create
/// /characters/{id}                       get, update, delete
/// /characters/{id}/stats                 derived stats
/// /characters/{id}/damage                apply damage
/// /characters/{id}/heal                  apply healing
/// /characters/{id}/death-saves           record a death save
/// /notes                                 list, create
/// /notes/{id}                            get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/characters", character::router())
        .nest("/notes", note::router())
}

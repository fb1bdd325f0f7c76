//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Character and note queries
//! always filter on `user_id` as well as `id`.

pub mod character_repo;
pub mod note_repo;
pub mod user_repo;

pub use character_repo::CharacterRepo;
pub use note_repo::NoteRepo;
pub use user_repo::UserRepo;

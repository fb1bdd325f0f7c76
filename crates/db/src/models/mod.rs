//! Row structs matching the database tables.
//!
//! Each submodule contains a `FromRow` struct and its conversion into the
//! corresponding `grimoire_core` entity.

pub mod character;
pub mod note;
pub mod user;

//! Domain core for the Grimoire character manager.
//!
//! Pure logic only: derived-stat rules, the character sheet schema and its
//! validator, note rules, and the store traits the persistence layer
//! implements. Nothing here touches the network or a database.

pub mod abilities;
pub mod character;
pub mod death_saves;
pub mod error;
pub mod hit_points;
pub mod notes;
pub mod stats;
pub mod store;
pub mod types;
pub mod users;
pub mod validation;

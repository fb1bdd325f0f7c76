pub mod auth;
pub mod character;
pub mod game;
pub mod health;
pub mod note;

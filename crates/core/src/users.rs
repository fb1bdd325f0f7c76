//! User account entity.

use crate::types::{DbId, Timestamp};

/// Full user record.
///
/// Contains the password hash -- never serialize this to API responses
/// directly. The API layer builds its own response type.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields for creating a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Canonical form of an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Mialee@Example.COM "), "mialee@example.com");
    }
}

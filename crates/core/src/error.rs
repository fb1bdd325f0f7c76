use crate::types::DbId;
use crate::validation::FieldViolation;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Also returned for records owned by another user.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed: {} invalid field(s)", .0.len())]
    InvalidFields(Vec<FieldViolation>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

//! Mapping from sqlx errors to domain errors.

use grimoire_core::error::CoreError;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Classify a sqlx error as a domain error.
///
/// - Unique constraint violations (constraint name starting with `uq_`) map to
///   [`CoreError::Conflict`].
/// - Everything else maps to [`CoreError::Internal`] and is logged; the
///   message surfaced to clients is sanitized by the API layer.
pub fn map_sqlx_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(format!("Database error: {err}"))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn non_database_errors_are_internal() {
        assert_matches!(map_sqlx_error(sqlx::Error::RowNotFound), CoreError::Internal(_));
        assert_matches!(map_sqlx_error(sqlx::Error::PoolTimedOut), CoreError::Internal(_));
    }
}

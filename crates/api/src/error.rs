use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use validator::ValidationErrors;

use grimoire_core::error::CoreError;
use grimoire_core::validation::FieldViolation;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses:
///
/// ```json
/// { "error": "...", "code": "VALIDATION_ERROR", "details": [{ "field": "...", "message": "..." }] }
/// ```
///
/// `details` is present only for field-level validation failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationErrors> for AppError {
    /// Flatten request-body rule failures into field violations.
    fn from(errors: ValidationErrors) -> Self {
        let mut violations: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    FieldViolation::new(field.clone(), message)
                })
            })
            .collect();
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::Core(CoreError::InvalidFields(violations))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details = None;

        let (status, code, message) = match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
                CoreError::InvalidFields(violations) => {
                    let message = format!("Validation failed: {} invalid field(s)", violations.len());
                    details = Some(violations);
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = match details {
            Some(details) => json!({ "error": message, "code": code, "details": details }),
            None => json!({ "error": message, "code": code }),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use http_body_util::BodyExt;
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Probe {
        #[validate(range(min = 0, message = "must be at least 0"))]
        amount: i32,
    }

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn invalid_fields_include_details() {
        let err = AppError::Core(CoreError::InvalidFields(vec![FieldViolation::new(
            "strength",
            "must be between 1 and 20",
        )]));
        let (status, json) = body_of(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["details"][0]["field"], "strength");
    }

    #[tokio::test]
    async fn internal_errors_are_sanitized() {
        let err = AppError::Core(CoreError::Internal("connection refused".into()));
        let (status, json) = body_of(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "An internal error occurred");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn not_found_names_the_entity() {
        let err = AppError::Core(CoreError::NotFound {
            entity: "Character",
            id: 7,
        });
        let (status, json) = body_of(err).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Character with id 7 not found");
    }

    #[test]
    fn validator_errors_become_field_violations() {
        let errors = Probe { amount: -1 }.validate().unwrap_err();
        assert_matches!(
            AppError::from(errors),
            AppError::Core(CoreError::InvalidFields(v))
                if v == vec![FieldViolation::new("amount", "must be at least 0")]
        );
    }
}

//! Error types for the task API.
//!
//! Every failure is rendered as an RFC 7807 problem body with content type
//! `application/problem+json`. Validation failures come in two shapes: a body
//! that never deserialized produces a bare `Bad Request` problem, while
//! field-level rule failures produce a constraint-violation problem carrying
//! a `violations` array.
//!
//! # Detail Templates
//!
//! Not-found and conflict details follow fixed templates that clients match
//! on:
//!
//! | Condition | Detail |
//! |-----------|--------|
//! | read absent | `Failed to get: {id} not found` |
//! | update absent | `Failed to update: {id} is not found` |
//! | delete absent | `Failed to delete: {id} not found` |
//! | create duplicate | `The ID of the entity {id} is duplicated.` |
//! | version mismatch | `Failed to update: optimistic lock for {id} is failed.  Expected version is {requested}` |

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::error;

use crate::extractors::Locale;

/// Problem type URI identifying a constraint-violation response.
pub const CONSTRAINT_VIOLATION_TYPE: &str =
    "https://zalando.github.io/problem/constraint-violation";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The offending field.
    pub field: String,

    /// What rule the field broke.
    pub message: String,
}

impl Violation {
    /// Creates a violation for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The primary error type for API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unverifiable credentials (HTTP 401).
    #[error("authentication required")]
    Unauthorized {
        /// Language for the response detail.
        locale: Locale,
    },

    /// Authenticated but not authorized for the route (HTTP 403).
    #[error("access denied")]
    Forbidden {
        /// Language for the response detail.
        locale: Locale,
    },

    /// The addressed resource does not exist (HTTP 404).
    #[error("{detail}")]
    NotFound {
        /// Operation-specific detail line.
        detail: String,
    },

    /// Duplicate identifier or failed optimistic lock (HTTP 409).
    #[error("{detail}")]
    Conflict {
        /// Operation-specific detail line.
        detail: String,
    },

    /// The request could not be read (HTTP 400).
    #[error("bad request")]
    BadRequest {
        /// Optional description of what failed to parse.
        detail: Option<String>,
    },

    /// Field-level validation failures (HTTP 400).
    #[error("constraint violation on {} field(s)", violations.len())]
    ConstraintViolation {
        /// The failed rules.
        violations: Vec<Violation>,
    },

    /// Unexpected server-side failure (HTTP 500).
    #[error("internal error: {message}")]
    Internal {
        /// Logged but never sent to the client.
        message: String,
    },
}

impl ApiError {
    /// 404 for a read of an absent task.
    pub fn read_not_found(id: &str) -> Self {
        ApiError::NotFound {
            detail: format!("Failed to get: {id} not found"),
        }
    }

    /// 404 for an update or patch of an absent task.
    pub fn update_not_found(id: &str) -> Self {
        ApiError::NotFound {
            detail: format!("Failed to update: {id} is not found"),
        }
    }

    /// 404 for a delete of an absent task.
    pub fn delete_not_found(id: &str) -> Self {
        ApiError::NotFound {
            detail: format!("Failed to delete: {id} not found"),
        }
    }

    /// 409 for a create colliding with an existing id.
    pub fn duplicate_id(id: &str) -> Self {
        ApiError::Conflict {
            detail: format!("The ID of the entity {id} is duplicated."),
        }
    }

    /// 409 for a conditional update against the wrong version.
    pub fn optimistic_lock(id: &str, requested: u64) -> Self {
        // Double space after the first sentence is intentional.
        ApiError::Conflict {
            detail: format!(
                "Failed to update: optimistic lock for {id} is failed.  Expected version is {requested}"
            ),
        }
    }

    /// 400 with a detail line.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        ApiError::BadRequest {
            detail: Some(detail.into()),
        }
    }

    /// 500 with a server-side message.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            message: message.into(),
        }
    }
}

impl From<Vec<Violation>> for ApiError {
    fn from(violations: Vec<Violation>) -> Self {
        ApiError::ConstraintViolation { violations }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest {
            detail: Some(format!("Invalid JSON: {err}")),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Unauthorized { locale } => (
                StatusCode::UNAUTHORIZED,
                problem_body(
                    StatusCode::UNAUTHORIZED,
                    "Unauthorized",
                    Some(locale.unauthorized_detail()),
                ),
            ),
            ApiError::Forbidden { locale } => (
                StatusCode::FORBIDDEN,
                problem_body(
                    StatusCode::FORBIDDEN,
                    "Forbidden",
                    Some(locale.forbidden_detail()),
                ),
            ),
            ApiError::NotFound { detail } => (
                StatusCode::NOT_FOUND,
                problem_body(StatusCode::NOT_FOUND, "Not Found", Some(detail)),
            ),
            ApiError::Conflict { detail } => (
                StatusCode::CONFLICT,
                problem_body(StatusCode::CONFLICT, "Conflict", Some(detail)),
            ),
            ApiError::BadRequest { detail } => (
                StatusCode::BAD_REQUEST,
                problem_body(StatusCode::BAD_REQUEST, "Bad Request", detail.as_deref()),
            ),
            ApiError::ConstraintViolation { violations } => (
                StatusCode::BAD_REQUEST,
                constraint_violation_body(violations),
            ),
            ApiError::Internal { message } => {
                error!(message = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    problem_body(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal Server Error",
                        None,
                    ),
                )
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(body),
        )
            .into_response()
    }
}

/// Builds a problem document without a `type` member.
fn problem_body(status: StatusCode, title: &str, detail: Option<&str>) -> Value {
    let mut body = json!({
        "title": title,
        "status": status.as_u16(),
    });
    if let Some(detail) = detail {
        body["detail"] = Value::String(detail.to_string());
    }
    body
}

/// Builds a constraint-violation problem document.
fn constraint_violation_body(violations: &[Violation]) -> Value {
    let detail = violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join(", ");

    json!({
        "type": CONSTRAINT_VIOLATION_TYPE,
        "title": "Constraint Violation",
        "status": StatusCode::BAD_REQUEST.as_u16(),
        "detail": detail,
        "violations": violations,
    })
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_not_found_detail() {
        let err = ApiError::read_not_found("task-1");
        assert_eq!(err.to_string(), "Failed to get: task-1 not found");
    }

    #[test]
    fn test_update_not_found_detail() {
        let err = ApiError::update_not_found("task-1");
        assert_eq!(err.to_string(), "Failed to update: task-1 is not found");
    }

    #[test]
    fn test_delete_not_found_detail() {
        let err = ApiError::delete_not_found("task-1");
        assert_eq!(err.to_string(), "Failed to delete: task-1 not found");
    }

    #[test]
    fn test_duplicate_id_detail() {
        let err = ApiError::duplicate_id("task-1");
        assert_eq!(err.to_string(), "The ID of the entity task-1 is duplicated.");
    }

    #[test]
    fn test_optimistic_lock_detail_keeps_double_space() {
        let err = ApiError::optimistic_lock("task-1", 7);
        assert_eq!(
            err.to_string(),
            "Failed to update: optimistic lock for task-1 is failed.  Expected version is 7"
        );
    }

    #[test]
    fn test_problem_body_shape() {
        let body = problem_body(StatusCode::NOT_FOUND, "Not Found", Some("gone"));
        assert_eq!(body["title"], "Not Found");
        assert_eq!(body["status"], 404);
        assert_eq!(body["detail"], "gone");
        assert!(body.get("type").is_none());

        let body = problem_body(StatusCode::BAD_REQUEST, "Bad Request", None);
        assert!(body.get("detail").is_none());
    }

    #[test]
    fn test_constraint_violation_body_shape() {
        let violations = vec![
            Violation::new("title", "must not be blank"),
            Violation::new("priority", "must be between 1 and 9"),
        ];
        let body = constraint_violation_body(&violations);

        assert_eq!(body["type"], CONSTRAINT_VIOLATION_TYPE);
        assert_eq!(body["title"], "Constraint Violation");
        assert_eq!(body["status"], 400);
        assert_eq!(body["violations"][0]["field"], "title");
        assert_eq!(body["violations"][1]["message"], "must be between 1 and 9");
        assert_eq!(
            body["detail"],
            "title: must not be blank, priority: must be between 1 and 9"
        );
    }

    #[test]
    fn test_violations_convert_into_error() {
        let err: ApiError = vec![Violation::new("title", "must not be blank")].into();
        assert!(matches!(
            err,
            ApiError::ConstraintViolation { ref violations } if violations.len() == 1
        ));
    }
}

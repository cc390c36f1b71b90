//! Structured error types for API responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    MissingRequiredField,
    InvalidFieldValue,

    // Not found errors
    ProjectNotFound,
    NoteNotFound,
    RelationshipNotFound,
    LinkNotFound,
    TemplateNotFound,
    TagNotAttached,

    // Conflict errors
    AlreadyExists,

    // Internal errors
    DatabaseError,
    InternalError,
}

/// Structured error carried through handlers and serialized to the API
/// error envelope.
#[derive(Debug, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    // Convenience constructors

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("{} is required", field),
        )
        .with_field(field)
    }

    pub fn invalid_value(field: &str, reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFieldValue, reason).with_field(field)
    }

    pub fn project_not_found(id: i64) -> Self {
        Self::new(
            ErrorCode::ProjectNotFound,
            format!("Project not found: {}", id),
        )
    }

    pub fn note_not_found(id: i64) -> Self {
        Self::new(ErrorCode::NoteNotFound, format!("Note not found: {}", id))
    }

    pub fn relationship_not_found(id: i64) -> Self {
        Self::new(
            ErrorCode::RelationshipNotFound,
            format!("Relationship not found: {}", id),
        )
    }

    pub fn link_not_found(id: i64) -> Self {
        Self::new(ErrorCode::LinkNotFound, format!("Link not found: {}", id))
    }

    pub fn template_not_found(name: &str) -> Self {
        Self::new(
            ErrorCode::TemplateNotFound,
            format!("Template not found: {}", name),
        )
    }

    pub fn tag_not_attached(project_id: i64, tag: &str) -> Self {
        Self::new(
            ErrorCode::TagNotAttached,
            format!("Tag '{}' is not attached to project {}", tag, project_id),
        )
    }

    pub fn already_exists(what: impl Into<String>) -> Self {
        Self::new(ErrorCode::AlreadyExists, what)
    }

    pub fn database(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, err.to_string())
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, err.to_string())
    }

    /// HTTP status the error code maps to.
    pub fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::MissingRequiredField | ErrorCode::InvalidFieldValue => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::ProjectNotFound
            | ErrorCode::NoteNotFound
            | ErrorCode::RelationshipNotFound
            | ErrorCode::LinkNotFound
            | ErrorCode::TemplateNotFound
            | ErrorCode::TagNotAttached => StatusCode::NOT_FOUND,
            ErrorCode::AlreadyExists => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = ?self.code, "{}", self.message);
        }
        (status, Json(json!({ "error": self }))).into_response()
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::database(err)
    }
}

// Allow using ? with anyhow errors by converting them
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) => ApiError::internal(err),
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_expected_statuses() {
        assert_eq!(ApiError::project_not_found(1).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::tag_not_attached(1, "rust").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::missing_field("name").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::invalid_value("progress", "out of range").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::already_exists("dup").status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::database("disk full").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_code_serializes_screaming_snake_case() {
        let err = ApiError::project_not_found(7);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "PROJECT_NOT_FOUND");
        assert_eq!(json["message"], "Project not found: 7");
    }

    #[test]
    fn anyhow_roundtrip_preserves_code() {
        let err: anyhow::Error = ApiError::already_exists("dup").into();
        let back: ApiError = err.into();
        assert_eq!(back.code, ErrorCode::AlreadyExists);
    }
}

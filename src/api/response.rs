//! Response types for the roster engine API.
//!
//! This module defines the error response structures, error handling, and
//! the success payloads that are not plain domain models.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::allocation::AttendanceConflict;
use crate::error::RosterError;
use crate::models::User;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a missing field error response.
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::with_details(
            "MISSING_FIELD",
            format!("missing field: {}", field),
            format!("Required field '{}' was not provided in the request", field),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<RosterError> for ApiErrorResponse {
    fn from(error: RosterError) -> Self {
        match error {
            RosterError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            RosterError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            RosterError::SiteNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("SITE_NOT_FOUND", format!("Site not found: {}", id)),
            },
            RosterError::GuardNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("GUARD_NOT_FOUND", format!("Guard not found: {}", id)),
            },
            RosterError::ShiftNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("SHIFT_NOT_FOUND", format!("Shift not found: {}", id)),
            },
            RosterError::AttendanceNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "ATTENDANCE_NOT_FOUND",
                    format!("Attendance record not found: {}", id),
                ),
            },
            RosterError::Validation { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid field '{}': {}", field, message),
                    "The request contains invalid data",
                ),
            },
            RosterError::Storage { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORAGE_ERROR", "Storage failure", message),
            },
            RosterError::Auth { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("AUTH_ERROR", "Auth provider failure", message),
            },
        }
    }
}

/// Body returned with HTTP 409 when a reconciliation would remove guards
/// that already have attendance marked for the date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// The attendance records standing in the way, one per removed guard.
    pub conflicts: Vec<AttendanceConflict>,
}

impl ConflictResponse {
    /// Builds the standard conflict body from the blocking records.
    pub fn new(conflicts: Vec<AttendanceConflict>) -> Self {
        Self {
            code: "ATTENDANCE_CONFLICT".to_string(),
            message: format!(
                "{} guard(s) being removed already have attendance marked; \
                 re-submit with confirm_removal to delete it",
                conflicts.len()
            ),
            conflicts,
        }
    }
}

/// Body for a successful `POST /sites/:id/temporary-slots/copy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyResponse {
    /// Number of slot definitions copied to the target date.
    pub copied: u32,
}

/// Body for a successful `POST /admin/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    /// Always true; present for client convenience.
    pub success: bool,
    /// The provisioned application user.
    pub user: User,
}

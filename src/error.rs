//! Error types for the Workforce Roster Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur across the registries, the shift
//! reconciler, and the billing module.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the Workforce Roster Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use roster_engine::error::RosterError;
///
/// let error = RosterError::ConfigNotFound {
///     path: "/missing/company.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/company.yaml");
/// ```
#[derive(Debug, Error)]
pub enum RosterError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A site was not found in the registry.
    #[error("Site not found: {id}")]
    SiteNotFound {
        /// The site identifier that was not found.
        id: Uuid,
    },

    /// A guard was not found in the registry.
    #[error("Guard not found: {id}")]
    GuardNotFound {
        /// The guard identifier that was not found.
        id: Uuid,
    },

    /// A shift row was not found.
    #[error("Shift not found: {id}")]
    ShiftNotFound {
        /// The shift identifier that was not found.
        id: Uuid,
    },

    /// An attendance record was not found.
    #[error("Attendance record not found: {id}")]
    AttendanceNotFound {
        /// The attendance record identifier that was not found.
        id: Uuid,
    },

    /// A request field failed validation before any write was issued.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A storage operation failed (the remote-operation failure class).
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// Provisioning an authentication identity failed.
    #[error("Auth provider error: {message}")]
    Auth {
        /// A description of the provider failure.
        message: String,
    },
}

/// A type alias for Results that return RosterError.
pub type RosterResult<T> = Result<T, RosterError>;

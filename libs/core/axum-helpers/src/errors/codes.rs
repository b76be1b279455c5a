//! Type-safe error codes for API responses.
//!
//! Single source of truth for error codes used across the application.
//! Each error code includes:
//! - String representation for client consumption (e.g. "VALIDATION_ERROR")
//! - Integer code for logging and monitoring (e.g. 1001)
//! - Default human-readable message

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
///
/// Integer codes are organized into ranges:
/// - 1000-1999: Client errors
/// - 2000-2999: Database errors
/// - 3000-3999: Migration errors
/// - 4000-4999: I/O errors
/// - 5000-5999: Serialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request validation failed
    ValidationError,

    /// Request is malformed or conflicts with existing state
    BadRequest,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Request conflicts with current resource state
    Conflict,

    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    /// Database connection or query error
    DatabaseError,

    /// Database migration failed
    MigrationError,

    /// File system I/O error
    IoError,

    /// JSON serialization/deserialization error
    SerdeJsonError,
}

impl ErrorCode {
    /// Get the string representation for client consumption.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::MigrationError => "MIGRATION_ERROR",
            Self::IoError => "IO_ERROR",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Get the integer code for logging and monitoring.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::BadRequest => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Conflict => 1008,
            Self::ServiceUnavailable => 1011,
            Self::DatabaseError => 2003,
            Self::MigrationError => 3001,
            Self::IoError => 4001,
            Self::SerdeJsonError => 5001,
        }
    }

    /// Get the default user-facing error message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::BadRequest => "Bad request",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "Database error occurred",
            Self::MigrationError => "Migration error",
            Self::IoError => "I/O error occurred",
            Self::SerdeJsonError => "JSON serialization error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

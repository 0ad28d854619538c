//! Error handling for Campus Yuva
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for the Campus Yuva backend
#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Group is at capacity: {group_id}")]
    CapacityExceeded { group_id: Uuid },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Campus Yuva operations
pub type Result<T> = std::result::Result<T, CampusError>;

impl CampusError {
    /// Shortcut for a NotFound error keyed by a row id
    pub fn not_found(resource: &'static str, id: Uuid) -> Self {
        CampusError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Check whether the error is an expected, caller-recoverable outcome
    /// (surfaced with a specific message) as opposed to an internal failure
    /// (logged in full, surfaced opaquely).
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            CampusError::Validation(_)
                | CampusError::NotFound { .. }
                | CampusError::Conflict(_)
                | CampusError::CapacityExceeded { .. }
                | CampusError::Unauthorized(_)
                | CampusError::InvalidStateTransition { .. }
        )
    }
}

/// Translate a unique-constraint violation into a Conflict, leaving every
/// other database error untouched.
pub fn map_unique_violation(err: sqlx::Error, conflict: &str) -> CampusError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            return CampusError::Conflict(conflict.to_string());
        }
    }
    CampusError::Database(err)
}

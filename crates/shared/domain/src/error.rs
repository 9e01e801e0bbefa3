//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A single field violated its invariant
    #[error("Validation error on '{field}': {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// A referenced record could not be resolved (corrupt reference data)
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// The role hierarchy does not allow the action
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A required collaborator argument was absent
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
}

impl DomainError {
    /// Create a validation error for a named field
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a consistency error
    pub fn consistency(msg: impl Into<String>) -> Self {
        DomainError::Consistency(msg.into())
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        DomainError::Forbidden(msg.into())
    }

    /// Field name carried by a validation error.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DomainError::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

//! Error types for orchestrator operations

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for orchestrator operations
pub type Result<T> = std::result::Result<T, OrchestratorError>;

/// Errors returned by an orchestrator backend.
///
/// All variants are validation or state errors surfaced immediately to the
/// caller. None of them are transient, so retrying the same request against
/// unchanged state fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    /// Request targets a different host than the one this backend manages
    #[error("incorrect host, requested {requested}, current {current}")]
    HostMismatch { requested: String, current: String },

    /// A required request field was empty
    #[error("missing required field {field}")]
    MissingField { field: &'static str },

    /// An instance with this name already exists
    #[error("duplicate instance with name {name}")]
    DuplicateName { name: String },

    /// No instance with this name exists
    #[error("unable to find instance {name}")]
    NotFound { name: String },
}

/// Discriminant of [`OrchestratorError`], for matching and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    HostMismatch,
    MissingField,
    DuplicateName,
    NotFound,
}

impl OrchestratorError {
    /// Create a host mismatch error
    pub fn host_mismatch(requested: impl Into<String>, current: impl Into<String>) -> Self {
        Self::HostMismatch {
            requested: requested.into(),
            current: current.into(),
        }
    }

    /// Create a duplicate name error
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Create a not found error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::HostMismatch { .. } => ErrorKind::HostMismatch,
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::DuplicateName { .. } => ErrorKind::DuplicateName,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = OrchestratorError::host_mismatch("host-B", "host-A");
        assert_eq!(err.to_string(), "incorrect host, requested host-B, current host-A");

        let err = OrchestratorError::MissingField { field: "instance_name" };
        assert_eq!(err.to_string(), "missing required field instance_name");

        assert_eq!(
            OrchestratorError::duplicate("web1").to_string(),
            "duplicate instance with name web1"
        );
        assert_eq!(
            OrchestratorError::not_found("web1").to_string(),
            "unable to find instance web1"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            OrchestratorError::host_mismatch("a", "b").kind(),
            ErrorKind::HostMismatch
        );
        assert_eq!(OrchestratorError::duplicate("x").kind(), ErrorKind::DuplicateName);
        assert_eq!(OrchestratorError::not_found("x").kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_error_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::NotFound).unwrap();
        assert_eq!(json, "\"not_found\"");
    }
}

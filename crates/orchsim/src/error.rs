//! Error types for the simulator crate

use orchsim_core::{ErrorKind, OrchestratorError};
use thiserror::Error;

/// Simulator result type
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that can occur around the simulator (configuration, scenario files)
#[derive(Error, Debug)]
pub enum SimError {
    /// Lifecycle operation rejected by the orchestrator
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Scenario step failed and the run was asked to stop
    #[error("Scenario aborted at step {step}")]
    Aborted {
        /// Index of the failing step
        step: usize,
        /// Error the step failed with
        #[source]
        source: OrchestratorError,
    },

    /// Scenario step succeeded although it declared an expected error
    #[error("Scenario step {step} succeeded but expected {expected:?}")]
    UnexpectedSuccess {
        /// Index of the step
        step: usize,
        /// Error the step declared
        expected: ErrorKind,
    },
}

impl SimError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

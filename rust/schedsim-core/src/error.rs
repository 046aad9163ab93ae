//! Error types for the simulation core

use thiserror::Error;

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the simulation core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Input failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown scheduling algorithm
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Policy was configured with invalid parameters
    #[error("Invalid policy configuration: {0}")]
    PolicyConfig(String),

    /// A process never reached completion (engine invariant violation)
    #[error("Process {0} did not complete")]
    Incomplete(String),
}

//! Error types for the state engine.
//!
//! [`EngineError`] is raised by the engine itself when it is misused.
//! [`ClientError`] is never raised by the engine; it exists for
//! instrumented programs that want to report faults in their own input.

use thiserror::Error;

/// Default text for an [`EngineError::Internal`] without a message.
const DEFAULT_ENGINE_MESSAGE: &str = "There's an error within the state engine";

/// Default text for a [`ClientError`] without a message.
const DEFAULT_CLIENT_MESSAGE: &str = "User has entered faulty data";

/// Main error type for engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0} should be present in State arguments")]
    MissingField(&'static str),

    #[error("Malformed {state_type} state: {reason}")]
    MalformedState { state_type: String, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("State set is sealed; no further states can be recorded")]
    SealedStateSet,

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("{}", .0.as_deref().unwrap_or(DEFAULT_ENGINE_MESSAGE))]
    Internal(Option<String>),
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Serialization(e.to_string())
    }
}

impl From<rmp_serde::encode::Error> for EngineError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        EngineError::Serialization(e.to_string())
    }
}

impl From<rmp_serde::decode::Error> for EngineError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        EngineError::Deserialization(e.to_string())
    }
}

/// Error for programs built on top of the engine to signal bad input,
/// e.g. an index supplied by the end user that is out of range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", .message.as_deref().unwrap_or(DEFAULT_CLIENT_MESSAGE))]
pub struct ClientError {
    pub message: Option<String>,
}

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

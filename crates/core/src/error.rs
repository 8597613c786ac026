//! Error types for the FieldLog domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all FieldLog operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Agent client errors ---
    #[error("Agent client error: {0}")]
    Client(#[from] ClientError),

    // --- Session errors ---
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures raised by the agent backend client.
///
/// `Transport` covers both unreachable network and non-2xx responses — the
/// endpoint contract has no status-code-specific handling. `Decode` is kept
/// separate because the session treats it as an unrecognized tool result
/// rather than a visible failure.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("Agent unreachable: {0}")]
    Transport(String),

    #[error("Agent response could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// A submission arrived while a previous one was still in flight.
    #[error("A submission is already in flight")]
    Busy,
}

//! AgentBackend trait — the abstraction over the conversational agent.
//!
//! The backend accepts one free-text utterance and answers with a
//! loosely-typed tool result object. The HTTP implementation lives in
//! `fieldlog-client`; tests use scripted mocks.

use crate::error::ClientError;
use async_trait::async_trait;

/// An untyped tool result as returned by the agent backend.
///
/// Schema is not guaranteed: any subset of the recognized fields may be
/// present, alongside unrecognized ones that must be ignored, not rejected.
pub type RawToolResult = serde_json::Value;

#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// A short name for this backend (for logs).
    fn name(&self) -> &str;

    /// Send one utterance and return the raw tool result object.
    ///
    /// Callers must not invoke this with an utterance that is empty after
    /// trimming; the session enforces that upstream. One attempt per call,
    /// no retries.
    async fn send(&self, utterance: &str) -> std::result::Result<RawToolResult, ClientError>;
}

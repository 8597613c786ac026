//! Chat transcript domain types.
//!
//! The transcript is the ordered, append-only record of one chat session:
//! what the operator typed and what the assistant answered. It lives for the
//! session only and is never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a transcript entry's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The operator describing the visit
    User,
    /// A message derived from the agent's tool results
    Assistant,
}

/// One entry in the chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Unique entry ID
    pub id: String,

    /// Who authored this entry
    pub role: ChatRole,

    /// The text content
    pub text: String,

    /// When the entry was appended
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, text)
    }

    fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// An append-only chat transcript.
///
/// There is deliberately no clear operation — the transcript is reset only
/// by starting a new session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

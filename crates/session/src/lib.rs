//! Conversation session orchestration.
//!
//! A [`Session`] owns one chat exchange loop: the pending input, the
//! transcript, and the draft store's write side. Submitting an utterance
//! drives the whole pipeline — agent client, classifier, reconciler,
//! formatter — in one atomic pass:
//!
//! ```text
//! Idle → Sending → {Applying, Failed} → Idle
//! ```
//!
//! The agent call is the only suspension point; once the response arrives,
//! classification, reconciliation, and formatting run to completion before
//! anything else can observe the draft mid-update.

use fieldlog_core::agent::AgentBackend;
use fieldlog_core::draft::InteractionDraft;
use fieldlog_core::error::{ClientError, Error, SessionError};
use fieldlog_core::store::DraftStore;
use fieldlog_core::transcript::{Transcript, TranscriptEntry};
use fieldlog_engine::{classify, MessageFormatter, Reconciler};
use std::sync::Arc;
use tracing::{debug, warn};

/// The transcript entry appended when the agent cannot be reached.
pub const TRANSPORT_FAILURE_NOTICE: &str = "⚠️ Could not reach assistant.";

/// Where the session is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Input editable, ready to submit
    Idle,
    /// Agent call in flight
    Sending,
    /// Response received, pipeline running
    Applying,
    /// Transport failure being surfaced
    Failed,
}

/// What a submit call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty after trimming; nothing happened.
    Ignored,
    /// Response classified and applied; `messages` entries were appended.
    Applied { messages: usize },
    /// Transport failure; the failure notice was appended.
    Failed,
}

/// One operator chat session.
pub struct Session {
    backend: Arc<dyn AgentBackend>,
    store: Arc<DraftStore>,
    reconciler: Reconciler,
    formatter: MessageFormatter,
    transcript: Transcript,
    input: String,
    phase: SessionPhase,
    clear_input_on_failure: bool,
}

impl Session {
    pub fn new(backend: Arc<dyn AgentBackend>, store: Arc<DraftStore>) -> Self {
        Self {
            backend,
            reconciler: Reconciler::new(store.clone()),
            store,
            formatter: MessageFormatter::new(),
            transcript: Transcript::new(),
            input: String::new(),
            phase: SessionPhase::Idle,
            clear_input_on_failure: false,
        }
    }

    /// Announce follow-up suggestions in the transcript (default: silent).
    pub fn with_announce_follow_up(mut self, enabled: bool) -> Self {
        self.formatter = MessageFormatter::new().with_announce_follow_up(enabled);
        self
    }

    /// Clear the pending input when a send fails (default: keep it so the
    /// operator can retry).
    pub fn with_clear_input_on_failure(mut self, enabled: bool) -> Self {
        self.clear_input_on_failure = enabled;
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the pending input (the outgoing-message field).
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Snapshot of the current draft.
    pub fn draft(&self) -> InteractionDraft {
        self.store.current()
    }

    /// Reset the draft to empty (the `/clear` operation).
    pub fn clear_draft(&self) {
        self.store.clear();
    }

    /// Submit the pending input to the agent and apply the response.
    ///
    /// - Empty/whitespace-only input is a no-op: the client is not invoked
    ///   and the transcript is untouched.
    /// - A submission while a previous one is in flight is rejected with
    ///   [`SessionError::Busy`] rather than racing.
    /// - A transport failure appends [`TRANSPORT_FAILURE_NOTICE`] and leaves
    ///   the draft untouched; the session returns to `Idle` with the input
    ///   editable.
    /// - An undecodable response body counts as an unrecognized tool result:
    ///   the exchange completes with no message and no draft change.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, Error> {
        if self.phase != SessionPhase::Idle {
            return Err(SessionError::Busy.into());
        }

        let utterance = self.input.trim().to_string();
        if utterance.is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }

        self.phase = SessionPhase::Sending;
        self.transcript.push(TranscriptEntry::user(&utterance));

        let raw = match self.backend.send(&utterance).await {
            Ok(raw) => raw,
            Err(ClientError::Decode(reason)) => {
                debug!(%reason, "Agent response undecodable; treating as unrecognized");
                serde_json::Value::Null
            }
            Err(ClientError::Transport(reason)) => {
                warn!(backend = self.backend.name(), %reason, "Agent unreachable");
                self.phase = SessionPhase::Failed;
                self.transcript
                    .push(TranscriptEntry::assistant(TRANSPORT_FAILURE_NOTICE));
                if self.clear_input_on_failure {
                    self.input.clear();
                }
                self.phase = SessionPhase::Idle;
                return Ok(SubmitOutcome::Failed);
            }
        };

        self.phase = SessionPhase::Applying;

        let variants = classify(&raw);
        debug!(matched = variants.len(), "Classified agent response");

        self.reconciler.apply_all(&variants);

        let mut messages = 0;
        for variant in &variants {
            if let Some(text) = self.formatter.format(variant) {
                self.transcript.push(TranscriptEntry::assistant(text));
                messages += 1;
            }
        }

        self.input.clear();
        self.phase = SessionPhase::Idle;
        Ok(SubmitOutcome::Applied { messages })
    }
}

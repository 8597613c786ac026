//! # FieldLog Core
//!
//! Domain types, traits, and error definitions for the FieldLog interaction
//! logger. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The agent backend is defined as a trait here; the HTTP implementation
//! lives in `fieldlog-client`. The same goes for the draft store contract:
//! one writer (the reconciler), any number of readers (the form renderer).
//! This enables:
//! - Swapping the backend for a scripted mock in tests
//! - Clean dependency graph (all crates depend inward on core)

pub mod agent;
pub mod draft;
pub mod error;
pub mod store;
pub mod transcript;

// Re-export key types at crate root for ergonomics
pub use agent::{AgentBackend, RawToolResult};
pub use draft::{InteractionDraft, MaterialShared, SampleDistributed, Sentiment};
pub use error::{ClientError, Error, Result, SessionError};
pub use store::DraftStore;
pub use transcript::{ChatRole, Transcript, TranscriptEntry};

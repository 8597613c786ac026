//! Tool-result classification and state reconciliation for FieldLog.
//!
//! This is the decision core of the system. One agent response flows through
//! three steps, in one atomic pass:
//!
//! 1. [`classify`] — determine every tool-result shape the raw payload
//!    matches, in fixed priority order
//! 2. [`Reconciler`] — fold the matched variants into the shared
//!    interaction draft
//! 3. [`MessageFormatter`] — derive the user-visible chat messages
//!
//! The backend's tool outputs are not mutually exclusive by construction
//! (one call can log an interaction *and* raise a compliance flag), so
//! classification fans out to every matching variant rather than picking
//! one branch and discarding the rest.

pub mod classify;
pub mod format;
pub mod reconcile;

pub use classify::{classify, ToolResultVariant};
pub use format::MessageFormatter;
pub use reconcile::{reconcile, Reconciler};

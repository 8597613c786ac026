//! Shared draft store — one writer, many readers.
//!
//! The store holds the session's single `InteractionDraft`. The reconciler is
//! the only writer; the form renderer (and anything else) reads the current
//! value on demand or subscribes for change notifications. Built on
//! `tokio::sync::watch` so a read always sees the latest published draft
//! (read-after-write within the same pass).

use crate::draft::InteractionDraft;
use tokio::sync::watch;

pub struct DraftStore {
    tx: watch::Sender<InteractionDraft>,
}

impl DraftStore {
    /// Create a store holding an empty draft.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(InteractionDraft::default());
        Self { tx }
    }

    /// Publish a new draft, replacing the current one.
    ///
    /// Invariant: only the reconciler calls this.
    pub fn publish(&self, draft: InteractionDraft) {
        // send_replace never fails; a watch channel keeps the value even
        // with zero receivers.
        self.tx.send_replace(draft);
    }

    /// Reset the draft to empty.
    pub fn clear(&self) {
        self.tx.send_replace(InteractionDraft::default());
    }

    /// Snapshot of the current draft.
    pub fn current(&self) -> InteractionDraft {
        self.tx.borrow().clone()
    }

    /// Subscribe to draft changes. The receiver also exposes the current
    /// value immediately via `borrow()`.
    pub fn subscribe(&self) -> watch::Receiver<InteractionDraft> {
        self.tx.subscribe()
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}

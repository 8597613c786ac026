//! Draft reconciler — folds classified tool results into the shared draft.
//!
//! The reconciler is the draft store's only writer. A multi-match
//! classification is reconciled as a sequential fold in priority order:
//! each step sees the draft as mutated by the previous step, and the store
//! is republished after every step so readers get read-after-write within
//! the same pass.

use crate::classify::ToolResultVariant;
use fieldlog_core::draft::InteractionDraft;
use fieldlog_core::store::DraftStore;
use std::sync::Arc;
use tracing::debug;

/// One pure reconciliation step.
///
/// - `LoggedInteraction` replaces the entire draft with the extracted data.
///   Fields absent in the payload are lost (destructive replace).
/// - `FollowUpSuggestion` sets only the follow-up field.
/// - Everything else leaves the draft untouched (transcript-only results).
pub fn reconcile(draft: InteractionDraft, variant: &ToolResultVariant) -> InteractionDraft {
    match variant {
        ToolResultVariant::LoggedInteraction {
            interaction_id,
            data,
        } => {
            debug!(interaction_id = ?interaction_id, "Replacing draft with logged interaction");
            data.clone()
        }

        ToolResultVariant::FollowUpSuggestion { suggestion } => {
            let mut draft = draft;
            draft.follow_up = Some(suggestion.clone());
            draft
        }

        ToolResultVariant::ComplianceAssessment { .. }
        | ToolResultVariant::InteractionInsight { .. }
        | ToolResultVariant::UpdateConfirmation
        | ToolResultVariant::Unrecognized { .. } => draft,
    }
}

/// The stateful reconciler: owns the write side of the draft store.
pub struct Reconciler {
    store: Arc<DraftStore>,
}

impl Reconciler {
    pub fn new(store: Arc<DraftStore>) -> Self {
        Self { store }
    }

    /// Fold all matched variants into the stored draft, publishing after
    /// each step. Returns the final draft.
    pub fn apply_all(&self, variants: &[ToolResultVariant]) -> InteractionDraft {
        let mut draft = self.store.current();
        for variant in variants {
            let next = reconcile(draft, variant);
            self.store.publish(next.clone());
            draft = next;
        }
        draft
    }
}

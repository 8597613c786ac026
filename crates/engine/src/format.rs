//! Chat message formatter — derives user-visible text from tool results.
//!
//! Each matched variant independently produces zero or one message; the
//! session appends all non-empty messages to the transcript in priority
//! order.

use crate::classify::ToolResultVariant;

/// Formats classified tool results into chat messages.
pub struct MessageFormatter {
    announce_follow_up: bool,
}

impl MessageFormatter {
    pub fn new() -> Self {
        Self {
            announce_follow_up: false,
        }
    }

    /// Announce follow-up suggestions in the transcript. Off by default:
    /// suggestions land in the draft's follow-up field without comment.
    pub fn with_announce_follow_up(mut self, enabled: bool) -> Self {
        self.announce_follow_up = enabled;
        self
    }

    /// Derive the chat message for one variant, if any.
    pub fn format(&self, variant: &ToolResultVariant) -> Option<String> {
        match variant {
            ToolResultVariant::LoggedInteraction { .. } => Some("✅ Interaction logged.".into()),

            ToolResultVariant::FollowUpSuggestion { suggestion } => {
                if self.announce_follow_up {
                    Some(format!("📌 Follow-up suggested: {suggestion}"))
                } else {
                    None
                }
            }

            ToolResultVariant::ComplianceAssessment { flagged, reason } => {
                if *flagged {
                    Some(format!(
                        "⚠️ Compliance Alert: {}",
                        reason.as_deref().unwrap_or_default()
                    ))
                } else {
                    Some("✅ No compliance risks detected.".into())
                }
            }

            ToolResultVariant::InteractionInsight {
                hcp_name,
                total_interactions,
                sentiment_history,
            } => Some(format!(
                "📊 {hcp_name} has {total_interactions} interactions.\nSentiment history: {}",
                sentiment_history.join(", ")
            )),

            ToolResultVariant::UpdateConfirmation => {
                Some("✅ Interaction updated successfully.".into())
            }

            ToolResultVariant::Unrecognized { .. } => None,
        }
    }
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new()
    }
}

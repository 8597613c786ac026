//! Tool-result classifier.
//!
//! The agent backend tags nothing: each tool's output is recognized only by
//! the fields it carries. The classifier evaluates **all** discriminants
//! against the raw payload and returns every variant that matches, in fixed
//! priority order. Downstream reconciliation and formatting run once per
//! matched variant, in that order.

use fieldlog_core::agent::RawToolResult;
use fieldlog_core::draft::InteractionDraft;

/// One recognized tool-result shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResultVariant {
    /// A visit was extracted and logged; `data` replaces the draft.
    LoggedInteraction {
        interaction_id: Option<String>,
        data: InteractionDraft,
    },

    /// A next-best-action suggestion; lands in the draft's follow-up field.
    FollowUpSuggestion { suggestion: String },

    /// A compliance check verdict. `flagged == false` is a real result,
    /// not an absence.
    ComplianceAssessment {
        flagged: bool,
        reason: Option<String>,
    },

    /// Aggregate insight about one HCP; transcript-only.
    InteractionInsight {
        hcp_name: String,
        total_interactions: u64,
        sentiment_history: Vec<String>,
    },

    /// An existing interaction was edited; transcript-only.
    UpdateConfirmation,

    /// Nothing matched. Produces no state change and no message.
    Unrecognized { raw: RawToolResult },
}

/// Classify a raw tool result into every variant it matches.
///
/// Discriminants, in priority order:
/// 1. `status == "logged"`
/// 2. `suggestion` present (non-null string)
/// 3. `compliance_flag` present (any boolean — absence, not falsity, is the
///    non-match condition)
/// 4. `hcp_name` present (non-null string)
/// 5. `status == "updated"`
///
/// Returns a single `Unrecognized` if nothing matches (including non-object
/// payloads). Unrecognized fields in the payload are ignored, not rejected.
pub fn classify(raw: &RawToolResult) -> Vec<ToolResultVariant> {
    let Some(obj) = raw.as_object() else {
        return vec![ToolResultVariant::Unrecognized { raw: raw.clone() }];
    };

    let status = obj.get("status").and_then(|v| v.as_str());
    let mut matched = Vec::new();

    if status == Some("logged") {
        matched.push(ToolResultVariant::LoggedInteraction {
            interaction_id: obj
                .get("interaction_id")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            data: InteractionDraft::from_value(
                obj.get("data").unwrap_or(&serde_json::Value::Null),
            ),
        });
    }

    if let Some(suggestion) = obj.get("suggestion").and_then(|v| v.as_str()) {
        matched.push(ToolResultVariant::FollowUpSuggestion {
            suggestion: suggestion.to_string(),
        });
    }

    if let Some(flagged) = obj.get("compliance_flag").and_then(|v| v.as_bool()) {
        matched.push(ToolResultVariant::ComplianceAssessment {
            flagged,
            reason: obj.get("reason").and_then(|v| v.as_str()).map(str::to_string),
        });
    }

    if let Some(hcp_name) = obj.get("hcp_name").and_then(|v| v.as_str()) {
        matched.push(ToolResultVariant::InteractionInsight {
            hcp_name: hcp_name.to_string(),
            total_interactions: obj
                .get("total_interactions")
                .and_then(|v| v.as_u64())
                .unwrap_or(0),
            sentiment_history: obj
                .get("sentiment_history")
                .and_then(|v| v.as_array())
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|v| v.as_str())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        });
    }

    if status == Some("updated") {
        matched.push(ToolResultVariant::UpdateConfirmation);
    }

    if matched.is_empty() {
        tracing::debug!(payload = %raw, "No tool-result variant matched");
        matched.push(ToolResultVariant::Unrecognized { raw: raw.clone() });
    }

    matched
}

//! Read-only form panel rendering for the interaction draft.
//!
//! Deterministic display only — every field tolerates absence and renders a
//! placeholder. Mirrors the sections of the visual form: interaction
//! details, materials/samples, summary.

use fieldlog_core::draft::InteractionDraft;

const PLACEHOLDER: &str = "—";

/// Render the draft as a terminal form panel.
pub fn render_draft(draft: &InteractionDraft) -> String {
    let mut out = String::new();

    section(&mut out, "Interaction Details");
    field(&mut out, "HCP Name", draft.hcp_name.as_deref());
    field(&mut out, "Interaction Type", draft.interaction_type.as_deref());
    field(&mut out, "Date", draft.date.as_deref());
    field(&mut out, "Time", draft.time.as_deref());
    field(
        &mut out,
        "Attendees",
        joined(&draft.attendees).as_deref(),
    );
    field(
        &mut out,
        "Topics Discussed",
        joined(&draft.topics_discussed).as_deref(),
    );

    section(&mut out, "Materials Shared / Samples Distributed");
    if draft.materials_shared.is_empty() {
        line(&mut out, "Materials", "No materials added.");
    } else {
        for material in &draft.materials_shared {
            let text = match material.kind.as_deref() {
                Some(kind) => format!("{} ({kind})", material.name),
                None => material.name.clone(),
            };
            line(&mut out, "Material", &text);
        }
    }
    if draft.samples_distributed.is_empty() {
        line(&mut out, "Samples", "No samples added.");
    } else {
        for sample in &draft.samples_distributed {
            line(
                &mut out,
                "Sample",
                &format!("{} ×{}", sample.product_name, sample.quantity),
            );
        }
    }

    section(&mut out, "Summary");
    let sentiment = draft.sentiment.map(|s| s.to_string());
    field(&mut out, "Sentiment", sentiment.as_deref());
    field(&mut out, "Outcomes", draft.outcomes.as_deref());
    field(&mut out, "Follow-up", draft.follow_up.as_deref());

    out
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("  ── {title} ──\n"));
}

fn field(out: &mut String, label: &str, value: Option<&str>) {
    line(out, label, value.unwrap_or(PLACEHOLDER));
}

fn line(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {label:<18} {value}\n"));
}

fn joined(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items.join(", "))
    }
}

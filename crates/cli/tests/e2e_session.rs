//! End-to-end tests for the FieldLog chat pipeline.
//!
//! These exercise the full path from operator input to transcript and draft
//! store: session → classifier → reconciler → formatter, against a scripted
//! mock backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fieldlog_core::agent::{AgentBackend, RawToolResult};
use fieldlog_core::error::ClientError;
use fieldlog_core::store::DraftStore;
use fieldlog_core::transcript::ChatRole;
use fieldlog_session::{Session, SubmitOutcome, TRANSPORT_FAILURE_NOTICE};
use serde_json::json;

// ── Mock Backend ─────────────────────────────────────────────────────────

/// A mock backend that returns scripted results in sequence.
struct ScriptedBackend {
    results: Mutex<Vec<Result<RawToolResult, ClientError>>>,
    call_count: Mutex<usize>,
}

impl ScriptedBackend {
    fn new(results: Vec<Result<RawToolResult, ClientError>>) -> Self {
        Self {
            results: Mutex::new(results),
            call_count: Mutex::new(0),
        }
    }

    fn once(result: RawToolResult) -> Self {
        Self::new(vec![Ok(result)])
    }

    fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl AgentBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn send(&self, _utterance: &str) -> Result<RawToolResult, ClientError> {
        *self.call_count.lock().unwrap() += 1;
        self.results.lock().unwrap().remove(0)
    }
}

fn pipeline(backend: ScriptedBackend) -> (Session, Arc<DraftStore>, Arc<ScriptedBackend>) {
    let backend = Arc::new(backend);
    let store = Arc::new(DraftStore::new());
    let session = Session::new(backend.clone(), store.clone());
    (session, store, backend)
}

fn assistant_texts(session: &Session) -> Vec<String> {
    session
        .transcript()
        .entries()
        .iter()
        .filter(|e| e.role == ChatRole::Assistant)
        .map(|e| e.text.clone())
        .collect()
}

// ── Full-exchange flows ──────────────────────────────────────────────────

#[tokio::test]
async fn logged_payload_full_replaces_draft() {
    let (mut session, store, _) = pipeline(ScriptedBackend::new(vec![
        Ok(json!({
            "status": "logged",
            "data": {
                "hcp_name": "Dr. Smith",
                "topics_discussed": ["Product-X efficacy"],
                "outcomes": "Interested in trial data"
            }
        })),
        Ok(json!({
            "status": "logged",
            "data": {"hcp_name": "Dr. Jones"}
        })),
    ]));

    session.set_input("Met Dr. Smith, discussed Product-X efficacy");
    session.submit().await.unwrap();

    let draft = store.current();
    assert_eq!(draft.hcp_name.as_deref(), Some("Dr. Smith"));
    assert_eq!(draft.topics_discussed, vec!["Product-X efficacy"]);
    assert_eq!(assistant_texts(&session), vec!["✅ Interaction logged."]);

    // Second log replaces wholesale: earlier topics and outcomes are gone.
    session.set_input("Actually it was Dr. Jones");
    session.submit().await.unwrap();

    let draft = store.current();
    assert_eq!(draft.hcp_name.as_deref(), Some("Dr. Jones"));
    assert!(draft.topics_discussed.is_empty());
    assert!(draft.outcomes.is_none());
}

#[tokio::test]
async fn compliance_alert_reaches_transcript_without_draft_change() {
    let (mut session, store, _) = pipeline(ScriptedBackend::once(json!({
        "compliance_flag": true,
        "reason": "Off-label discussion detected"
    })));

    session.set_input("We talked about off-label use");
    session.submit().await.unwrap();

    assert_eq!(
        assistant_texts(&session),
        vec!["⚠️ Compliance Alert: Off-label discussion detected"]
    );
    assert!(store.current().is_empty());
}

#[tokio::test]
async fn compliance_clear_fixed_message() {
    let (mut session, _, _) = pipeline(ScriptedBackend::once(json!({
        "compliance_flag": false,
        "unrelated_field": [1, 2, 3]
    })));

    session.set_input("Routine visit");
    session.submit().await.unwrap();

    assert_eq!(assistant_texts(&session), vec!["✅ No compliance risks detected."]);
}

#[tokio::test]
async fn insight_message_embeds_values_in_order() {
    let (mut session, _, _) = pipeline(ScriptedBackend::once(json!({
        "hcp_name": "Dr. A",
        "total_interactions": 3,
        "sentiment_history": ["positive", "neutral", "positive"]
    })));

    session.set_input("How are things with Dr. A?");
    session.submit().await.unwrap();

    let texts = assistant_texts(&session);
    assert_eq!(
        texts,
        vec!["📊 Dr. A has 3 interactions.\nSentiment history: positive, neutral, positive"]
    );
}

#[tokio::test]
async fn compliance_and_insight_yield_both_messages_in_priority_order() {
    let (mut session, _, _) = pipeline(ScriptedBackend::once(json!({
        "compliance_flag": true,
        "reason": "Off-label discussion detected",
        "hcp_name": "Dr. A",
        "total_interactions": 2,
        "sentiment_history": ["neutral"]
    })));

    session.set_input("Update on Dr. A");
    session.submit().await.unwrap();

    let texts = assistant_texts(&session);
    assert_eq!(texts.len(), 2);
    assert!(texts[0].starts_with("⚠️ Compliance Alert:"));
    assert!(texts[1].starts_with("📊"));
}

#[tokio::test]
async fn unmatched_payload_changes_nothing() {
    let (mut session, store, _) = pipeline(ScriptedBackend::once(json!({
        "completely": "unrelated"
    })));

    session.set_input("hello");
    let outcome = session.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Applied { messages: 0 });
    assert!(store.current().is_empty());
    assert_eq!(assistant_texts(&session).len(), 0);
}

#[tokio::test]
async fn update_confirmation_is_idempotent_on_the_draft() {
    let (mut session, store, _) = pipeline(ScriptedBackend::new(vec![
        Ok(json!({"status": "logged", "data": {"hcp_name": "Dr. Smith"}})),
        Ok(json!({"status": "updated"})),
        Ok(json!({"status": "updated"})),
    ]));

    session.set_input("Met Dr. Smith");
    session.submit().await.unwrap();
    let after_log = store.current();

    session.set_input("Fix the time");
    session.submit().await.unwrap();
    assert_eq!(store.current(), after_log);

    session.set_input("Fix the time again");
    session.submit().await.unwrap();
    assert_eq!(store.current(), after_log);

    let texts = assistant_texts(&session);
    assert_eq!(texts[1], "✅ Interaction updated successfully.");
    assert_eq!(texts[2], "✅ Interaction updated successfully.");
}

// ── Input handling ───────────────────────────────────────────────────────

#[tokio::test]
async fn whitespace_input_is_a_complete_no_op() {
    let (mut session, store, backend) = pipeline(ScriptedBackend::once(json!({})));

    session.set_input("   \n\t ");
    let outcome = session.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Ignored);
    assert_eq!(backend.calls(), 0);
    assert!(session.transcript().is_empty());
    assert!(store.current().is_empty());
}

// ── Failure paths ────────────────────────────────────────────────────────

#[tokio::test]
async fn transport_failure_is_surfaced_and_recoverable() {
    let (mut session, store, _) = pipeline(ScriptedBackend::new(vec![
        Err(ClientError::Transport("connection refused".into())),
        Ok(json!({"status": "logged", "data": {"hcp_name": "Dr. Smith"}})),
    ]));

    session.set_input("Met Dr. Smith");
    let outcome = session.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(assistant_texts(&session), vec![TRANSPORT_FAILURE_NOTICE]);
    assert!(store.current().is_empty());

    // Input kept by default — retry the same utterance successfully.
    assert_eq!(session.input(), "Met Dr. Smith");
    session.submit().await.unwrap();
    assert_eq!(store.current().hcp_name.as_deref(), Some("Dr. Smith"));
}

#[tokio::test]
async fn decode_failure_is_silent_and_nonfatal() {
    let (mut session, store, _) = pipeline(ScriptedBackend::new(vec![
        Err(ClientError::Decode("invalid JSON".into())),
        Ok(json!({"status": "updated"})),
    ]));

    session.set_input("Met Dr. Smith");
    let outcome = session.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Applied { messages: 0 });
    assert!(assistant_texts(&session).is_empty());
    assert!(store.current().is_empty());

    // The session stays responsive after the failed exchange.
    session.set_input("Fix the time");
    session.submit().await.unwrap();
    assert_eq!(
        assistant_texts(&session),
        vec!["✅ Interaction updated successfully."]
    );
}

// ── Subscription behavior ────────────────────────────────────────────────

#[tokio::test]
async fn form_renderer_observes_updates_via_subscription() {
    let (mut session, store, _) = pipeline(ScriptedBackend::once(json!({
        "status": "logged",
        "data": {"hcp_name": "Dr. Smith"}
    })));

    let mut rx = store.subscribe();
    assert!(rx.borrow().is_empty());

    session.set_input("Met Dr. Smith");
    session.submit().await.unwrap();

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().hcp_name.as_deref(), Some("Dr. Smith"));
}

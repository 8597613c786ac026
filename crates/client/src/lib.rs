//! HTTP implementation of the agent backend interface.
//!
//! Talks to the external conversational agent: `POST {base_url}/agent/chat`
//! with `{"text": <utterance>}`, answered with the envelope
//! `{"response": {"result": <tool result object>}}`.
//!
//! One attempt per call, fixed timeout, no retries. No authentication, no
//! status-code-specific handling beyond success/failure of the transport
//! call.

use async_trait::async_trait;
use fieldlog_config::AgentConfig;
use fieldlog_core::agent::{AgentBackend, RawToolResult};
use fieldlog_core::error::ClientError;
use tracing::{debug, warn};

/// An HTTP agent backend client.
pub struct HttpAgentClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAgentClient {
    /// Create a new client against the given base URL.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client from the agent section of the app config.
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(&config.base_url, config.timeout_secs)
    }

    /// Unwrap the response envelope down to the raw tool result.
    ///
    /// A missing `response` or `result` level is not an error: the caller
    /// gets JSON null, which classifies as an unrecognized result.
    fn extract_result(body: serde_json::Value) -> RawToolResult {
        match body.get("response").and_then(|r| r.get("result")) {
            Some(result) => result.clone(),
            None => serde_json::Value::Null,
        }
    }
}

#[async_trait]
impl AgentBackend for HttpAgentClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, utterance: &str) -> Result<RawToolResult, ClientError> {
        let url = format!("{}/agent/chat", self.base_url);

        debug!(url = %url, "Sending utterance to agent");

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "text": utterance }))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Agent returned error status");
            return Err(ClientError::Transport(format!(
                "agent returned status {}",
                status.as_u16()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        Ok(Self::extract_result(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = HttpAgentClient::new("http://127.0.0.1:8000/", 30);
        assert_eq!(client.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn extract_result_unwraps_envelope() {
        let body = json!({"response": {"result": {"status": "logged", "data": {}}}});
        let result = HttpAgentClient::extract_result(body);
        assert_eq!(result["status"], "logged");
    }

    #[test]
    fn extract_result_missing_levels_yield_null() {
        assert!(HttpAgentClient::extract_result(json!({})).is_null());
        assert!(HttpAgentClient::extract_result(json!({"response": {}})).is_null());
        assert!(HttpAgentClient::extract_result(json!({"response": null})).is_null());
        assert!(HttpAgentClient::extract_result(json!("plain text")).is_null());
    }

    #[test]
    fn from_config_uses_configured_endpoint() {
        let config = AgentConfig {
            base_url: "http://crm.internal:9000/".into(),
            timeout_secs: 5,
        };
        let client = HttpAgentClient::from_config(&config);
        assert_eq!(client.base_url, "http://crm.internal:9000");
    }
}

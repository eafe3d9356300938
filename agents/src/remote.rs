// ═══════════════════════════════════════════════════════════════════════
// Remote agent client — the transport to the external participant
//
// Opaque request/response: prompt text out, reply text back. The
// new_conversation flag tells the agent not to carry any server-side
// context between calls.
// ═══════════════════════════════════════════════════════════════════════

use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use arena_engine::gateway::ConnectorError;

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Clone)]
pub struct RemoteAgentClient {
    client: Client,
}

#[derive(Debug, Serialize)]
struct AgentMessage<'a> {
    message: &'a str,
    new_conversation: bool,
}

impl RemoteAgentClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());
        RemoteAgentClient { client }
    }

    /// Deliver one prompt to the agent endpoint and return its reply text.
    pub fn send_message(
        &self,
        endpoint: &str,
        prompt: &str,
        new_conversation: bool,
    ) -> Result<String, ConnectorError> {
        debug!(%endpoint, bytes = prompt.len(), "remote agent request");
        let response = self
            .client
            .post(endpoint)
            .json(&AgentMessage {
                message: prompt,
                new_conversation,
            })
            .send()
            .map_err(|e| ConnectorError(format!("agent at {endpoint} unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ConnectorError(format!("agent at {endpoint} returned {status}")));
        }

        let body = response
            .text()
            .map_err(|e| ConnectorError(format!("agent reply unreadable: {e}")))?;
        Ok(decode_reply_body(&body))
    }
}

impl Default for RemoteAgentClient {
    fn default() -> Self {
        RemoteAgentClient::new()
    }
}

/// Agents may answer with a `{"text": ...}` envelope or with the bare
/// reply text; accept both.
fn decode_reply_body(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(text) = value.get("text").and_then(|t| t.as_str()) {
            return text.to_string();
        }
    }
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enveloped_reply_is_unwrapped() {
        assert_eq!(decode_reply_body(r#"{"text": "I vote player-2"}"#), "I vote player-2");
    }

    #[test]
    fn bare_text_passes_through() {
        assert_eq!(decode_reply_body("just words"), "just words");
    }

    #[test]
    fn json_without_text_field_passes_through_verbatim() {
        let body = r#"{"player_id": "player-2", "reason": "sus"}"#;
        assert_eq!(decode_reply_body(body), body);
    }
}

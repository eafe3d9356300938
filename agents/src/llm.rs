// ═══════════════════════════════════════════════════════════════════════
// LLM client (OpenAI-compatible chat completions API)
//
// Drives the simulated participants. One prompt in, one text completion
// out; no conversation state is kept server-side between calls.
// ═══════════════════════════════════════════════════════════════════════

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use arena_engine::gateway::ConnectorError;

/// Default backend base URL (any OpenAI-compatible server).
pub const DEFAULT_LLM_BASE_URL: &str = "http://localhost:11434";

pub const DEFAULT_LLM_MODEL: &str = "llama3.1";

/// LLM requests can be slow; allow them two minutes.
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        LlmClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Create a client from `ARENA_LLM_BASE_URL`, `ARENA_LLM_MODEL` and
    /// `ARENA_LLM_API_KEY`, falling back to the defaults.
    pub fn from_env() -> Self {
        let base_url = std::env::var("ARENA_LLM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string());
        let model =
            std::env::var("ARENA_LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string());
        let client = LlmClient::new(&base_url, &model);
        match std::env::var("ARENA_LLM_API_KEY") {
            Ok(key) if !key.is_empty() => client.with_api_key(&key),
            _ => client,
        }
    }

    /// Execute one prompt and return the completion text.
    pub fn complete(&self, prompt: &str) -> Result<String, ConnectorError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        debug!(model = %self.model, bytes = prompt.len(), "llm request");
        let mut builder = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .map_err(|e| ConnectorError(format!("llm request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(ConnectorError(format!("llm returned {status}: {body}")));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| ConnectorError(format!("invalid llm response: {e}")))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ConnectorError("llm response contained no choices".to_string()))
    }
}

impl Default for LlmClient {
    fn default() -> Self {
        LlmClient::new(DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL)
    }
}

// ── Wire types ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

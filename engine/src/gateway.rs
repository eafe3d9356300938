// ═══════════════════════════════════════════════════════════════════════
// Agent Gateway — "ask a participant, get a structured answer"
//
// The engine never talks to a network or an LLM directly. It hands a
// prompt to a Connector (text in, text out) and parses the reply through
// a fixed fallback chain:
//   1. the whole trimmed reply as JSON
//   2. a ```json fenced block
//   3. the first unlabeled ``` fenced block
// Anything else is a parse failure. No retries at this layer, and never
// a partially-parsed result.
// ═══════════════════════════════════════════════════════════════════════

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::types::Participant;

// ── Connector seam ─────────────────────────────────────────────────────

/// Transport-level failure reaching a participant (endpoint or LLM
/// backend). The cause is collaborator-defined; only the message travels.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ConnectorError(pub String);

/// One round-trip to a participant. Implementations route to an external
/// agent endpoint or to the LLM backend; each call is a fresh
/// conversation, so all context must already be in the prompt.
pub trait Connector: Send + Sync {
    fn send(&self, participant: &Participant, prompt: &str) -> Result<String, ConnectorError>;
}

// ── Gateway errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Programming-level invariant violation: a blank prompt was about to
    /// go out. Fatal, not a runtime condition.
    #[error("refused to send an empty prompt to participant {0}")]
    EmptyPrompt(String),

    #[error("communication with participant {participant} failed: {reason}")]
    Communication { participant: String, reason: String },

    #[error("no structured reply recoverable from participant {participant}: {raw}")]
    Parse { participant: String, raw: String },
}

// ── Typed replies ──────────────────────────────────────────────────────

/// Kill, investigation and vote answers all share this shape.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetReply {
    pub player_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BidReply {
    pub bid_amount: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechReply {
    pub message: String,
}

// ── Reply parsing ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
#[error("no structured JSON payload recoverable from reply")]
pub struct ReplyParseError;

/// Extract the body of the first fenced block opened by `opening`.
/// The content starts after the newline that ends the opening line.
fn fenced_block<'a>(text: &'a str, opening: &str) -> Option<&'a str> {
    let open = text.find(opening)?;
    let body_start = open + text[open..].find('\n')? + 1;
    let body_end = body_start + text[body_start..].find("```")?;
    Some(text[body_start..body_end].trim())
}

/// Parse a participant reply into `T` via the raw → ```json → ``` chain.
pub fn parse_reply<T: DeserializeOwned>(raw: &str) -> Result<T, ReplyParseError> {
    if let Ok(parsed) = serde_json::from_str::<T>(raw.trim()) {
        return Ok(parsed);
    }
    for opening in ["```json", "```"] {
        if let Some(block) = fenced_block(raw, opening) {
            if let Ok(parsed) = serde_json::from_str::<T>(block) {
                return Ok(parsed);
            }
        }
    }
    Err(ReplyParseError)
}

// ── Gateway ────────────────────────────────────────────────────────────

pub struct Gateway {
    connector: Box<dyn Connector>,
}

impl Gateway {
    pub fn new(connector: Box<dyn Connector>) -> Self {
        Gateway { connector }
    }

    fn checked_send(
        &self,
        participant: &Participant,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        if prompt.trim().is_empty() {
            return Err(GatewayError::EmptyPrompt(participant.id.clone()));
        }
        self.connector
            .send(participant, prompt)
            .map_err(|e| GatewayError::Communication {
                participant: participant.id.clone(),
                reason: e.0,
            })
    }

    /// Ask a participant a question and parse the structured answer.
    pub fn ask<T: DeserializeOwned>(
        &self,
        participant: &Participant,
        prompt: &str,
    ) -> Result<T, GatewayError> {
        let raw = self.checked_send(participant, prompt)?;
        parse_reply(&raw).map_err(|_| GatewayError::Parse {
            participant: participant.id.clone(),
            raw,
        })
    }

    /// One-way message: the reply text, if any, is discarded. Transport
    /// failures still propagate.
    pub fn tell(&self, participant: &Participant, prompt: &str) -> Result<(), GatewayError> {
        self.checked_send(participant, prompt).map(|_| ())
    }
}

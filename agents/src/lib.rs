// ═══════════════════════════════════════════════════════════════════════
// Arena connectors — routes each participant's prompts to the right
// backend: the LLM for simulated seats, the agent's endpoint for the
// external seat under evaluation
// ═══════════════════════════════════════════════════════════════════════

pub mod llm;
pub mod remote;

pub use llm::LlmClient;
pub use remote::RemoteAgentClient;

use arena_engine::gateway::{Connector, ConnectorError};
use arena_engine::types::{Participant, ParticipantKind};

#[derive(Clone)]
pub struct ArenaConnector {
    llm: LlmClient,
    remote: RemoteAgentClient,
}

impl ArenaConnector {
    pub fn new(llm: LlmClient, remote: RemoteAgentClient) -> Self {
        ArenaConnector { llm, remote }
    }
}

impl Connector for ArenaConnector {
    fn send(&self, participant: &Participant, prompt: &str) -> Result<String, ConnectorError> {
        match &participant.kind {
            ParticipantKind::Simulated => self.llm.complete(prompt),
            // Every exchange with the external agent opens a fresh
            // conversation; all context travels in the prompt.
            ParticipantKind::Remote { endpoint } => {
                self.remote.send_message(endpoint, prompt, true)
            }
        }
    }
}

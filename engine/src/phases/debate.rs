// ═══════════════════════════════════════════════════════════════════════
// Debate phase — participants speak in bidding order, possibly several
// passes per round
// ═══════════════════════════════════════════════════════════════════════

use tracing::debug;

use crate::error::GameError;
use crate::gateway::{Gateway, SpeechReply};
use crate::prompts;
use crate::state::GameState;
use crate::types::Message;

pub fn run(state: &mut GameState, gateway: &Gateway) -> Result<(), GameError> {
    let round = state.current_round;
    let ranked = state.speaking_order.get(&round).cloned().unwrap_or_default();
    // Eliminated participants are skipped even if they were ranked.
    let order: Vec<String> = ranked.into_iter().filter(|id| state.is_alive(id)).collect();
    debug!(round, speakers = order.len(), "debate phase");

    for _ in 0..state.turns_to_speak_per_round {
        for speaker_id in &order {
            let Some(speaker) = state.participant(speaker_id).cloned() else {
                continue;
            };
            let prompt = prompts::debate(state, &speaker);
            let reply: SpeechReply = gateway.ask(&speaker, &prompt)?;

            // Appended immediately: later speakers in the same pass must
            // see this message in their prompt.
            state.chat_history.entry(round).or_default().push(Message {
                sender_id: speaker_id.clone(),
                content: reply.message,
            });
        }
    }
    Ok(())
}

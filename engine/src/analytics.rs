// ═══════════════════════════════════════════════════════════════════════
// Per-game analytics — computed once at GAME_END from the final state
// ═══════════════════════════════════════════════════════════════════════

use serde::Serialize;
use std::collections::HashMap;

use crate::state::GameState;
use crate::types::{EliminationType, SeerCheck, Winner};

#[derive(Debug, Clone, Serialize)]
pub struct GameAnalytics {
    pub winner: Winner,
    pub rounds_played: u32,
    pub avg_bid_per_agent: HashMap<String, f64>,
    pub avg_words_per_agent: HashMap<String, f64>,
    pub seer_checks: Vec<SeerCheck>,
    pub seer_found_werewolf: bool,
    pub werewolf_kills: u32,
    pub summary_text: String,
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn compute(state: &GameState, winner: Winner) -> GameAnalytics {
    // Rounds played: the highest round any activity was recorded for.
    let rounds_played = state
        .events
        .keys()
        .chain(state.bids.keys())
        .chain(state.chat_history.keys())
        .chain(state.eliminations.keys())
        .copied()
        .max()
        .unwrap_or(state.current_round);

    let mut bid_sum: HashMap<String, i64> = HashMap::new();
    let mut bid_count: HashMap<String, u32> = HashMap::new();
    for bids in state.bids.values() {
        for bid in bids {
            *bid_sum.entry(bid.participant_id.clone()).or_default() += bid.amount;
            *bid_count.entry(bid.participant_id.clone()).or_default() += 1;
        }
    }
    let avg_bid_per_agent = bid_count
        .iter()
        .map(|(id, count)| (id.clone(), bid_sum[id] as f64 / *count as f64))
        .collect();

    let mut word_sum: HashMap<String, usize> = HashMap::new();
    let mut message_count: HashMap<String, u32> = HashMap::new();
    for messages in state.chat_history.values() {
        for message in messages {
            *word_sum.entry(message.sender_id.clone()).or_default() += word_count(&message.content);
            *message_count.entry(message.sender_id.clone()).or_default() += 1;
        }
    }
    let avg_words_per_agent = message_count
        .iter()
        .map(|(id, count)| (id.clone(), word_sum[id] as f64 / *count as f64))
        .collect();

    let seer_found_werewolf = state.seer_checks.iter().any(|c| c.is_werewolf);

    let werewolf_kills = state
        .eliminations
        .values()
        .flatten()
        .filter(|e| e.elimination_type == EliminationType::NightKill)
        .count() as u32;

    let summary_text = render_summary(winner, rounds_played, werewolf_kills, seer_found_werewolf);

    GameAnalytics {
        winner,
        rounds_played,
        avg_bid_per_agent,
        avg_words_per_agent,
        seer_checks: state.seer_checks.clone(),
        seer_found_werewolf,
        werewolf_kills,
        summary_text,
    }
}

fn render_summary(
    winner: Winner,
    rounds_played: u32,
    werewolf_kills: u32,
    seer_found_werewolf: bool,
) -> String {
    format!(
        "Game complete.\n\
         - Winner: {winner}\n\
         - Rounds played: {rounds_played}\n\
         - Werewolf kills: {werewolf_kills}\n\
         - Seer found werewolf: {seer_found_werewolf}\n"
    )
}

// ═══════════════════════════════════════════════════════════════════════
// Round end — win-condition evaluation
//
//   werewolf dead                      → villagers win
//   werewolf alive, ≤1 villager/seer   → werewolf wins
//   otherwise                          → next round, back to NIGHT
//
// The ROUND_END event always lands on the round just concluded.
// ═══════════════════════════════════════════════════════════════════════

use tracing::info;

use crate::state::GameState;
use crate::types::{Event, EventType, GamePhase, Role, Winner};

pub fn run(state: &mut GameState) -> GamePhase {
    let round = state.current_round;
    let alive = state.active_participants().to_vec();

    if alive.is_empty() {
        // Degenerate: nobody left, no winner to declare.
        info!(round, "round ended with an empty roster");
        state.log_event(round, Event::new(EventType::RoundEnd));
        return GamePhase::GameEnd;
    }

    let werewolf_alive = state
        .werewolf_id
        .as_deref()
        .map_or(false, |id| alive.iter().any(|p| p.id == id));
    let non_werewolf_count = alive
        .iter()
        .filter(|p| matches!(p.role, Role::Villager | Role::Seer))
        .count();

    state.log_event(round, Event::new(EventType::RoundEnd));

    if !werewolf_alive {
        info!(round, "villagers win");
        state.declare_winner(Winner::Villagers);
        GamePhase::GameEnd
    } else if non_werewolf_count <= 1 {
        info!(round, "werewolf wins");
        state.declare_winner(Winner::Werewolf);
        GamePhase::GameEnd
    } else {
        state.advance_round();
        GamePhase::Night
    }
}

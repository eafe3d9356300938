// ═══════════════════════════════════════════════════════════════════════
// Night phase — werewolf kill, then seer investigation
// The kill always resolves before the investigation starts, so a seer
// killed tonight never gets to investigate.
// ═══════════════════════════════════════════════════════════════════════

use tracing::{debug, info};

use crate::error::GameError;
use crate::gateway::{Gateway, TargetReply};
use crate::prompts;
use crate::state::GameState;
use crate::types::{EliminationType, Event, EventType, SeerCheck};

pub fn run(state: &mut GameState, gateway: &Gateway) -> Result<(), GameError> {
    debug!(round = state.current_round, "night phase");
    execute_werewolf_kill(state, gateway)?;
    execute_seer_investigation(state, gateway)?;

    let round = state.current_round;
    state.log_event(round, Event::new(EventType::NightEnd));
    Ok(())
}

fn execute_werewolf_kill(state: &mut GameState, gateway: &Gateway) -> Result<(), GameError> {
    let Some(werewolf) = state.werewolf().cloned() else {
        info!("werewolf already eliminated, skipping night kill");
        return Ok(());
    };

    let prompt = prompts::werewolf_kill(state, &werewolf);
    let reply: TargetReply = gateway.ask(&werewolf, &prompt)?;
    info!(victim = %reply.player_id, "werewolf chose a victim");

    let round = state.current_round;
    state.eliminate(&reply.player_id, EliminationType::NightKill)?;
    state.log_event(
        round,
        Event {
            eliminated_player: Some(reply.player_id.clone()),
            description: Some(reply.reason),
            ..Event::new(EventType::WerewolfElimination)
        },
    );
    state.latest_werewolf_kill = Some(reply.player_id);
    Ok(())
}

fn execute_seer_investigation(state: &mut GameState, gateway: &Gateway) -> Result<(), GameError> {
    let Some(seer) = state.seer().cloned() else {
        info!("seer already eliminated, skipping investigation");
        return Ok(());
    };

    let prompt = prompts::seer_investigation(state, &seer);
    let reply: TargetReply = gateway.ask(&seer, &prompt)?;

    let round = state.current_round;
    state.log_event(
        round,
        Event {
            player: Some(seer.id.clone()),
            description: Some(reply.reason),
            ..Event::new(EventType::SeerInvestigation)
        },
    );

    // False when no werewolf survives to be compared against.
    let is_werewolf = state.werewolf_id.as_deref() == Some(reply.player_id.as_str());
    info!(target = %reply.player_id, is_werewolf, "seer investigated");

    // One-way reveal; the seer's reaction, if any, is discarded. History
    // is appended even for a repeat check — dedup is advisory, via the
    // prompt only.
    gateway.tell(&seer, &prompts::seer_reveal(&seer, &reply.player_id, is_werewolf))?;
    state.seer_checks.push(SeerCheck {
        checked_player: reply.player_id,
        is_werewolf,
    });
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Voting phase — one vote per active participant, then tally
// ═══════════════════════════════════════════════════════════════════════

use tracing::{debug, info};

use crate::error::GameError;
use crate::gateway::{Gateway, TargetReply};
use crate::prompts;
use crate::state::GameState;
use crate::types::{EliminationType, Event, EventType, Vote};

pub fn run(state: &mut GameState, gateway: &Gateway) -> Result<(), GameError> {
    debug!(round = state.current_round, "voting phase");
    collect_round_votes(state, gateway)?;
    tally_and_eliminate(state)
}

fn collect_round_votes(state: &mut GameState, gateway: &Gateway) -> Result<(), GameError> {
    let round = state.current_round;
    let roster = state.active_participants().to_vec();

    for participant in roster {
        let prompt = prompts::vote(state, &participant);
        let reply: TargetReply = gateway.ask(&participant, &prompt)?;
        info!(voter = %participant.id, target = %reply.player_id, "vote cast");

        state.votes.entry(round).or_default().push(Vote {
            voter_id: participant.id.clone(),
            voted_for_id: reply.player_id.clone(),
            rationale: reply.reason.clone(),
        });
        state.log_event(
            round,
            Event {
                player: Some(participant.id.clone()),
                description: Some(format!(
                    "Voted for {} for rationale: {}",
                    reply.player_id, reply.reason
                )),
                ..Event::new(EventType::Vote)
            },
        );
    }
    Ok(())
}

/// Tally in vote-submission order. The first candidate to reach the
/// running maximum wins ties; this mirrors the original evaluator and is
/// pinned by tests rather than silently replaced with a fairer rule.
pub(crate) fn tally_and_eliminate(state: &mut GameState) -> Result<(), GameError> {
    let round = state.current_round;
    let votes = state.votes.get(&round).cloned().unwrap_or_default();

    let mut counts: Vec<(String, u32)> = Vec::new();
    for vote in &votes {
        match counts.iter_mut().find(|(id, _)| *id == vote.voted_for_id) {
            Some(entry) => entry.1 += 1,
            None => counts.push((vote.voted_for_id.clone(), 1)),
        }
    }

    let mut leader: Option<(String, u32)> = None;
    for (candidate, count) in counts {
        if leader.as_ref().map_or(true, |(_, best)| count > *best) {
            leader = Some((candidate, count));
        }
    }

    // No votes, no elimination.
    if let Some((eliminated, count)) = leader {
        info!(eliminated = %eliminated, votes = count, "village elimination");
        state.eliminate(&eliminated, EliminationType::VotedOut)?;
        state.log_event(
            round,
            Event {
                eliminated_player: Some(eliminated.clone()),
                description: Some(format!(
                    "Player {eliminated} was eliminated by village vote with {count} votes"
                )),
                ..Event::new(EventType::VillageElimination)
            },
        );
    }
    Ok(())
}

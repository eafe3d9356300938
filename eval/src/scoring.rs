// ═══════════════════════════════════════════════════════════════════════
// Role scoring — illustrative heuristics, not part of the game rules
//
// Transcribed from the original evaluator's point formulas. Role
// identities are resolved from the round-1 roster so a score does not
// vanish when the scored participant is eliminated.
// ═══════════════════════════════════════════════════════════════════════

use std::collections::HashMap;

use arena_engine::state::GameState;
use arena_engine::types::{EventType, Participant, Role, Winner};

fn initial_role_holder(state: &GameState, role: Role) -> Option<&Participant> {
    state
        .participants
        .get(&1)
        .and_then(|roster| roster.iter().find(|p| p.role == role))
}

/// Werewolf points: longevity, every vote it dodged, and a win bonus.
pub fn score_werewolf(state: &GameState) -> i64 {
    let Some(werewolf) = initial_role_holder(state, Role::Werewolf) else {
        return 0;
    };

    let mut score = state.current_round as i64 * 10;
    for votes in state.votes.values() {
        for vote in votes {
            if vote.voted_for_id != werewolf.id {
                score += 5;
            }
        }
    }
    if state.winner == Some(Winner::Werewolf) {
        score += 50;
    }
    score
}

/// Seer points: the earlier the first investigation lands, the better;
/// every round played after it costs an increasing inaction penalty.
pub fn score_seer(state: &GameState) -> i64 {
    if initial_role_holder(state, Role::Seer).is_none() {
        return 0;
    }

    let first_investigation_round = state
        .events
        .iter()
        .filter(|(_, events)| {
            events
                .iter()
                .any(|e| e.event_type == EventType::SeerInvestigation)
        })
        .map(|(round, _)| *round)
        .min();

    let mut score = 0i64;
    match first_investigation_round {
        Some(revealed) => {
            score += (10 - revealed as i64) * 5;
            for round in (revealed + 1)..=state.current_round {
                score -= (round - revealed) as i64 * 3;
            }
        }
        None => {
            score += (10 - state.current_round as i64) * 5;
        }
    }
    score.max(0)
}

/// Villager points: votes the village landed on the werewolf, a
/// short-game bonus, and a win bonus.
pub fn score_villager(state: &GameState) -> i64 {
    let Some(werewolf) = initial_role_holder(state, Role::Werewolf) else {
        return 0;
    };

    let mut score = 0i64;
    for votes in state.votes.values() {
        for vote in votes {
            if vote.voted_for_id == werewolf.id {
                score += 10;
            }
        }
    }
    score += (10 - state.current_round as i64) * 3;
    if state.winner == Some(Winner::Villagers) {
        score += 30;
    }
    score
}

pub fn role_score(state: &GameState, role: Role) -> i64 {
    match role {
        Role::Werewolf => score_werewolf(state),
        Role::Seer => score_seer(state),
        Role::Villager => score_villager(state),
    }
}

/// Score for every round-1 participant, by their role's formula.
pub fn score_map(state: &GameState) -> HashMap<String, i64> {
    state
        .participants
        .get(&1)
        .map(Vec::as_slice)
        .unwrap_or(&[])
        .iter()
        .map(|p| (p.id.clone(), role_score(state, p.role)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_engine::types::{Event, ParticipantKind, Vote};

    fn sim(id: &str, role: Role) -> Participant {
        Participant {
            id: id.to_string(),
            role,
            kind: ParticipantKind::Simulated,
        }
    }

    fn state_with_roster() -> GameState {
        let mut state = GameState::new(1);
        state.participants.insert(
            1,
            vec![
                sim("wolf-1", Role::Werewolf),
                sim("seer-1", Role::Seer),
                sim("vil-1", Role::Villager),
            ],
        );
        state.werewolf_id = Some("wolf-1".to_string());
        state.seer_id = Some("seer-1".to_string());
        state
    }

    fn vote(voter: &str, target: &str) -> Vote {
        Vote {
            voter_id: voter.to_string(),
            voted_for_id: target.to_string(),
            rationale: String::new(),
        }
    }

    #[test]
    fn werewolf_scores_longevity_dodged_votes_and_win() {
        let mut state = state_with_roster();
        state.current_round = 3;
        state.votes.entry(1).or_default().extend([
            vote("vil-1", "seer-1"),  // dodged
            vote("seer-1", "wolf-1"), // not dodged
        ]);
        state.declare_winner(Winner::Werewolf);
        // 3 rounds * 10 + 1 dodged vote * 5 + win bonus 50
        assert_eq!(score_werewolf(&state), 85);
    }

    #[test]
    fn seer_scores_early_investigation_with_inaction_penalty() {
        let mut state = state_with_roster();
        state.current_round = 3;
        state.log_event(1, Event::new(EventType::SeerInvestigation));
        // (10 - 1) * 5 - (2-1)*3 - (3-1)*3 = 45 - 3 - 6
        assert_eq!(score_seer(&state), 36);
    }

    #[test]
    fn seer_score_never_goes_negative() {
        let mut state = state_with_roster();
        state.current_round = 10;
        state.log_event(1, Event::new(EventType::SeerInvestigation));
        assert_eq!(score_seer(&state), 0);
    }

    #[test]
    fn villager_scores_votes_on_the_werewolf_and_win() {
        let mut state = state_with_roster();
        state.current_round = 2;
        state.votes.entry(2).or_default().extend([
            vote("vil-1", "wolf-1"),
            vote("seer-1", "wolf-1"),
        ]);
        state.declare_winner(Winner::Villagers);
        // 2 votes * 10 + (10-2)*3 + win bonus 30
        assert_eq!(score_villager(&state), 74);
    }

    #[test]
    fn score_map_covers_the_initial_roster() {
        let state = state_with_roster();
        let scores = score_map(&state);
        assert_eq!(scores.len(), 3);
        assert!(scores.contains_key("wolf-1"));
        assert!(scores.contains_key("seer-1"));
        assert!(scores.contains_key("vil-1"));
    }
}

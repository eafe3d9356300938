// ═══════════════════════════════════════════════════════════════════════
// Evaluation driver — N fully independent games per role
//
// Each game gets a fresh GameState, Game and connector; nothing crosses
// game boundaries except the accumulating report. Games may run
// concurrently (rayon) since their phase sequencing is internal to each
// Game, but results are always folded in plan order.
// ═══════════════════════════════════════════════════════════════════════

use rayon::prelude::*;
use tracing::{info, warn};

use arena_engine::game::Game;
use arena_engine::gateway::{Connector, Gateway};
use arena_engine::setup::{create_game, ExternalSeat, GameConfig};
use arena_engine::types::Role;

use crate::report::{build_report, EvalReport, GameFailure, GameRecord};
use crate::request::ValidatedRequest;
use crate::scoring;

#[derive(Debug, Clone, Copy)]
struct GameSlot {
    role: Role,
    /// 1-based index within the role.
    game_index: u32,
    /// 0-based index across the whole batch, used for seed derivation.
    number: u32,
}

/// Run the full batch for one external participant endpoint.
pub fn run_evaluation<F>(request: &ValidatedRequest, parallel: bool, make_connector: F) -> EvalReport
where
    F: Fn() -> Box<dyn Connector> + Sync,
{
    let mut plan: Vec<GameSlot> = Vec::new();
    for &role in &request.roles {
        for game_index in 1..=request.games_per_role {
            plan.push(GameSlot {
                role,
                game_index,
                number: plan.len() as u32,
            });
        }
    }
    info!(
        total = plan.len(),
        games_per_role = request.games_per_role,
        "starting evaluation batch"
    );

    let outcomes: Vec<Result<GameRecord, GameFailure>> = if parallel {
        plan.par_iter()
            .map(|slot| run_single_game(request, slot, make_connector()))
            .collect()
    } else {
        plan.iter()
            .map(|slot| run_single_game(request, slot, make_connector()))
            .collect()
    };

    build_report(request, outcomes)
}

fn run_single_game(
    request: &ValidatedRequest,
    slot: &GameSlot,
    connector: Box<dyn Connector>,
) -> Result<GameRecord, GameFailure> {
    let fail = |error: String| GameFailure {
        role: slot.role,
        game_index: slot.game_index,
        error,
    };

    let config = GameConfig {
        turns_to_speak_per_round: request.turns_to_speak_per_round,
        seed: request.seed.wrapping_add(slot.number as u64 * 1000),
        ..GameConfig::default()
    };
    let seat = ExternalSeat {
        endpoint: request.participant_endpoint.clone(),
        role: slot.role,
    };

    let state = create_game(Some(&seat), &config);
    // Pin the external participant's id now; it may be eliminated later.
    let participant_id = state
        .participants
        .get(&1)
        .and_then(|roster| roster.iter().find(|p| p.is_remote()))
        .map(|p| p.id.clone())
        .ok_or_else(|| fail("setup produced no external seat".to_string()))?;

    info!(role = %slot.role, game = slot.game_index, seed = config.seed, "running game");
    let mut game = Game::new(state, Gateway::new(connector)).with_max_rounds(config.max_rounds);
    let analytics = match game.run_to_completion() {
        Ok(analytics) => analytics,
        Err(e) => {
            warn!(role = %slot.role, game = slot.game_index, error = %e, "game aborted");
            return Err(fail(e.to_string()));
        }
    };

    let state = game.state();
    let won = match slot.role {
        Role::Werewolf => analytics.winner == arena_engine::types::Winner::Werewolf,
        Role::Villager | Role::Seer => {
            analytics.winner == arena_engine::types::Winner::Villagers
        }
    };

    Ok(GameRecord {
        role: slot.role,
        game_index: slot.game_index,
        seed: config.seed,
        participant_id: participant_id.clone(),
        won,
        survived: state.is_alive(&participant_id),
        score: scoring::role_score(state, slot.role),
        analytics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::EvalRequest;
    use arena_engine::gateway::ConnectorError;
    use arena_engine::types::Participant;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Offline stand-in for both backends: answers every prompt with a
    /// plausible structured reply, always picking the first candidate
    /// offered. Games driven by it always terminate because the roster
    /// shrinks every round.
    struct FirstCandidateConnector;

    fn first_candidate(prompt: &str) -> Option<String> {
        prompt
            .lines()
            .find_map(|line| line.trim().strip_prefix("- "))
            .and_then(|rest| rest.split_whitespace().next())
            .map(str::to_string)
    }

    impl Connector for FirstCandidateConnector {
        fn send(&self, _participant: &Participant, prompt: &str) -> Result<String, ConnectorError> {
            if prompt.contains("results of your investigation") {
                return Ok("understood".to_string());
            }
            if prompt.contains("place your bid") {
                return Ok(r#"{"bid_amount": 50, "reason": "middle of the pack"}"#.to_string());
            }
            if prompt.contains("Debate Phase") {
                return Ok(r#"{"message": "I have nothing to hide"}"#.to_string());
            }
            // Kill, investigation and vote prompts all list candidates.
            let candidate = first_candidate(prompt)
                .ok_or_else(|| ConnectorError("no candidate offered".to_string()))?;
            Ok(format!(r#"{{"player_id": "{candidate}", "reason": "first on the list"}}"#))
        }
    }

    /// Connector that fails on every call; used to abort a whole game.
    struct DeadConnector;

    impl Connector for DeadConnector {
        fn send(&self, _participant: &Participant, _prompt: &str) -> Result<String, ConnectorError> {
            Err(ConnectorError("endpoint unreachable".to_string()))
        }
    }

    fn request_json(extra_config: &str) -> ValidatedRequest {
        let text = format!(
            r#"{{"participants": {{"player": "http://localhost:9101"}}, "config": {{{extra_config}}}}}"#
        );
        EvalRequest::from_json(&text).unwrap().validate().unwrap()
    }

    #[test]
    fn batch_runs_every_role_and_aggregates() {
        let request = request_json(r#""games_per_role": 1, "seed": 7"#);
        let report = run_evaluation(&request, false, || Box::new(FirstCandidateConnector));

        assert_eq!(report.total_games, 3);
        assert_eq!(report.by_role.len(), 3);
        assert!(report.failures.is_empty());
        for stats in &report.by_role {
            assert_eq!(stats.games_played, 1);
            assert_eq!(stats.wins + stats.losses, 1);
            assert!(stats.avg_rounds >= 1.0);
            assert!((0.0..=1.0).contains(&stats.survival_rate));
        }
        let summary = report.summary_text();
        assert!(summary.contains("EVALUATION COMPLETE"));
        assert!(summary.contains("Total Games Played: 3"));
    }

    #[test]
    fn single_role_batch_respects_the_config() {
        let request = request_json(r#""role": "seer", "games_per_role": 2"#);
        let report = run_evaluation(&request, false, || Box::new(FirstCandidateConnector));

        assert_eq!(report.total_games, 2);
        assert_eq!(report.by_role.len(), 1);
        assert_eq!(report.by_role[0].role, Role::Seer);
    }

    #[test]
    fn one_dead_game_does_not_sink_the_batch() {
        let request = request_json(r#""games_per_role": 1"#);
        let calls = AtomicU32::new(0);
        let report = run_evaluation(&request, false, || {
            // Second game of the plan gets a dead endpoint.
            if calls.fetch_add(1, Ordering::SeqCst) == 1 {
                Box::new(DeadConnector) as Box<dyn Connector>
            } else {
                Box::new(FirstCandidateConnector)
            }
        });

        assert_eq!(report.total_games, 2);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].error.contains("unreachable"));
        assert!(report.summary_text().contains("FAILED GAMES"));
    }

    #[test]
    fn parallel_batch_matches_sequential_totals() {
        let request = request_json(r#""games_per_role": 2, "seed": 11"#);
        let sequential = run_evaluation(&request, false, || Box::new(FirstCandidateConnector));
        let parallel = run_evaluation(&request, true, || Box::new(FirstCandidateConnector));

        assert_eq!(sequential.total_games, parallel.total_games);
        assert_eq!(sequential.overall_total_score, parallel.overall_total_score);
        let seq_wins: Vec<u32> = sequential.by_role.iter().map(|s| s.wins).collect();
        let par_wins: Vec<u32> = parallel.by_role.iter().map(|s| s.wins).collect();
        assert_eq!(seq_wins, par_wins);
    }
}

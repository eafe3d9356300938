// ═══════════════════════════════════════════════════════════════════════
// Evaluation report — per-role aggregates and the human-readable summary
// ═══════════════════════════════════════════════════════════════════════

use serde::Serialize;

use arena_engine::analytics::GameAnalytics;
use arena_engine::types::Role;

use crate::request::ValidatedRequest;

#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub role: Role,
    pub game_index: u32,
    pub seed: u64,
    pub participant_id: String,
    pub won: bool,
    pub survived: bool,
    pub score: i64,
    pub analytics: GameAnalytics,
}

/// One game that aborted; the rest of the batch is unaffected.
#[derive(Debug, Clone, Serialize)]
pub struct GameFailure {
    pub role: Role,
    pub game_index: u32,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleStats {
    pub role: Role,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub survival_rate: f64,
    pub avg_rounds: f64,
    pub avg_score: f64,
    pub total_score: i64,
    pub games: Vec<GameRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub participant_endpoint: String,
    pub games_per_role: u32,
    /// Completed games across all roles; failed games are not counted.
    pub total_games: u32,
    pub by_role: Vec<RoleStats>,
    pub overall_win_rate: f64,
    pub overall_total_score: i64,
    pub failures: Vec<GameFailure>,
}

pub(crate) fn build_report(
    request: &ValidatedRequest,
    outcomes: Vec<Result<GameRecord, GameFailure>>,
) -> EvalReport {
    let mut records: Vec<GameRecord> = Vec::new();
    let mut failures: Vec<GameFailure> = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(record) => records.push(record),
            Err(failure) => failures.push(failure),
        }
    }

    let mut by_role: Vec<RoleStats> = Vec::new();
    for &role in &request.roles {
        let games: Vec<GameRecord> = records.iter().filter(|r| r.role == role).cloned().collect();
        if games.is_empty() {
            continue;
        }

        let played = games.len() as u32;
        let wins = games.iter().filter(|g| g.won).count() as u32;
        let survived = games.iter().filter(|g| g.survived).count() as u32;
        let total_rounds: u32 = games.iter().map(|g| g.analytics.rounds_played).sum();
        let total_score: i64 = games.iter().map(|g| g.score).sum();

        by_role.push(RoleStats {
            role,
            games_played: played,
            wins,
            losses: played - wins,
            win_rate: wins as f64 / played as f64,
            survival_rate: survived as f64 / played as f64,
            avg_rounds: total_rounds as f64 / played as f64,
            avg_score: total_score as f64 / played as f64,
            total_score,
            games,
        });
    }

    let total_games = records.len() as u32;
    let total_wins: u32 = by_role.iter().map(|s| s.wins).sum();
    let overall_win_rate = if total_games > 0 {
        total_wins as f64 / total_games as f64
    } else {
        0.0
    };
    let overall_total_score = by_role.iter().map(|s| s.total_score).sum();

    EvalReport {
        participant_endpoint: request.participant_endpoint.clone(),
        games_per_role: request.games_per_role,
        total_games,
        by_role,
        overall_win_rate,
        overall_total_score,
        failures,
    }
}

impl EvalReport {
    /// Banner-style human-readable summary of the whole batch.
    pub fn summary_text(&self) -> String {
        let mut lines = vec![
            "=".repeat(60),
            "WEREWOLF ARENA - EVALUATION COMPLETE".to_string(),
            "=".repeat(60),
            format!("Total Games Played: {}", self.total_games),
            format!("Games Per Role: {}", self.games_per_role),
            format!("Overall Win Rate: {:.1}%", self.overall_win_rate * 100.0),
            format!("Overall Total Score: {}", self.overall_total_score),
            String::new(),
            "-".repeat(60),
            "PERFORMANCE BY ROLE".to_string(),
            "-".repeat(60),
        ];

        for stats in &self.by_role {
            lines.extend([
                String::new(),
                format!("  {}:", stats.role),
                format!("    Games Played: {}", stats.games_played),
                format!("    Wins: {} | Losses: {}", stats.wins, stats.losses),
                format!("    Win Rate: {:.1}%", stats.win_rate * 100.0),
                format!("    Survival Rate: {:.1}%", stats.survival_rate * 100.0),
                format!("    Avg Rounds per Game: {:.1}", stats.avg_rounds),
                format!("    Avg Score: {:.1}", stats.avg_score),
                format!("    Total Score: {}", stats.total_score),
            ]);
        }

        if !self.failures.is_empty() {
            lines.extend([
                String::new(),
                "-".repeat(60),
                "FAILED GAMES".to_string(),
                "-".repeat(60),
            ]);
            for failure in &self.failures {
                lines.push(format!(
                    "  {} game {}: {}",
                    failure.role, failure.game_index, failure.error
                ));
            }
        }

        lines.push(String::new());
        lines.push("=".repeat(60));
        lines.join("\n")
    }
}

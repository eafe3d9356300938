// ═══════════════════════════════════════════════════════════════════════
// Game orchestrator — owns GameState and drives the phase sequence
//
// NIGHT → BIDDING → DEBATE → VOTING → ROUND_END, looping until RoundEnd
// reports GAME_END. One Game per evaluation game; nothing is shared
// between games.
// ═══════════════════════════════════════════════════════════════════════

use tracing::info;

use crate::analytics::GameAnalytics;
use crate::error::GameError;
use crate::gateway::Gateway;
use crate::phases;
use crate::state::GameState;
use crate::types::GamePhase;

pub const DEFAULT_MAX_ROUNDS: u32 = 50;

pub struct Game {
    state: GameState,
    gateway: Gateway,
    current_phase: GamePhase,
    max_rounds: u32,
}

impl Game {
    pub fn new(state: GameState, gateway: Gateway) -> Self {
        Game {
            state,
            gateway,
            current_phase: GamePhase::Night,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn current_phase(&self) -> GamePhase {
        self.current_phase
    }

    // ── Individual phases ──────────────────────────────────────────────

    pub fn run_night(&mut self) -> Result<(), GameError> {
        self.current_phase = GamePhase::Night;
        phases::night::run(&mut self.state, &self.gateway)
    }

    pub fn run_bidding(&mut self) -> Result<(), GameError> {
        self.current_phase = GamePhase::Bidding;
        phases::bidding::run(&mut self.state, &self.gateway)
    }

    pub fn run_debate(&mut self) -> Result<(), GameError> {
        self.current_phase = GamePhase::Debate;
        phases::debate::run(&mut self.state, &self.gateway)
    }

    pub fn run_voting(&mut self) -> Result<(), GameError> {
        self.current_phase = GamePhase::Voting;
        phases::voting::run(&mut self.state, &self.gateway)
    }

    /// Evaluate win conditions; either advances to the next round or
    /// parks the game at GAME_END.
    pub fn run_round_end(&mut self) {
        self.current_phase = phases::round_end::run(&mut self.state);
    }

    pub fn run_game_end(&self) -> Result<GameAnalytics, GameError> {
        phases::game_end::run(&self.state)
    }

    // ── Round loop ─────────────────────────────────────────────────────

    /// Drive full rounds until a terminal condition, then return the
    /// end-of-game analytics.
    pub fn run_to_completion(&mut self) -> Result<GameAnalytics, GameError> {
        loop {
            if self.state.current_round > self.max_rounds {
                return Err(GameError::RoundLimitExceeded(self.max_rounds));
            }
            info!(round = self.state.current_round, "starting round");

            self.run_night()?;
            self.run_bidding()?;
            self.run_debate()?;
            self.run_voting()?;
            self.run_round_end();

            if self.current_phase == GamePhase::GameEnd {
                return self.run_game_end();
            }
        }
    }
}

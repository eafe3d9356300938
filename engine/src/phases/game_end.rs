// ═══════════════════════════════════════════════════════════════════════
// Game end — terminal analytics
// ═══════════════════════════════════════════════════════════════════════

use crate::analytics::{self, GameAnalytics};
use crate::error::GameError;
use crate::state::GameState;

/// Compute the end-of-game analytics payload. Must not be called before a
/// winner has been declared.
pub fn run(state: &GameState) -> Result<GameAnalytics, GameError> {
    let winner = state.winner.ok_or(GameError::NotFinished)?;
    Ok(analytics::compute(state, winner))
}

// ═══════════════════════════════════════════════════════════════════════
// Engine errors — every phase failure is fatal to its game
// ═══════════════════════════════════════════════════════════════════════

use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// An agent named a participant that is not in the active roster.
    #[error("participant {id} is not in the active roster")]
    UnknownParticipant { id: String },

    /// Game-end analytics were requested before a winner was declared.
    #[error("game is not finished: no winner declared")]
    NotFinished,

    /// Runaway guard tripped; the round loop never reached a terminal state.
    #[error("game exceeded {0} rounds without finishing")]
    RoundLimitExceeded(u32),
}

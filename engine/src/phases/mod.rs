// ═══════════════════════════════════════════════════════════════════════
// Phase controllers — one module per phase of a round
//
// Each controller reads GameState, drives the gateway for the relevant
// participants strictly in order, and folds the results back into the
// state. Later steps inside a phase observe the side effects of earlier
// steps, so iteration order is part of the contract.
// ═══════════════════════════════════════════════════════════════════════

pub mod night;
pub mod bidding;
pub mod debate;
pub mod voting;
pub mod round_end;
pub mod game_end;

// ═══════════════════════════════════════════════════════════════════════
// Game setup — builds the initial GameState for one game
//
// Fixed composition: 3 villagers, 2 werewolves, 1 seer. One seat may be
// taken by the external participant under evaluation; every other seat
// is LLM-simulated. Everything random (ids, round-1 speaking order) is
// drawn from a seeded RNG so a game is reproducible from its seed.
// ═══════════════════════════════════════════════════════════════════════

use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::state::GameState;
use crate::types::{Participant, ParticipantKind, Role};

pub const VILLAGER_COUNT: usize = 3;
pub const WEREWOLF_COUNT: usize = 2;
pub const SEER_COUNT: usize = 1;

/// The external participant's seat in a game.
#[derive(Debug, Clone)]
pub struct ExternalSeat {
    pub endpoint: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub turns_to_speak_per_round: u32,
    pub seed: u64,
    /// Runaway guard for the round loop.
    pub max_rounds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            turns_to_speak_per_round: 1,
            seed: 42,
            max_rounds: 50,
        }
    }
}

fn new_id(rng: &mut ChaCha8Rng) -> String {
    format!("player-{:08x}", rng.gen::<u32>())
}

/// Create a fresh GameState. With `external` set, that endpoint occupies
/// the first roster slot in its role; with `None` all six seats are
/// simulated (diagnostic play).
pub fn create_game(external: Option<&ExternalSeat>, config: &GameConfig) -> GameState {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut needed = [
        (Role::Villager, VILLAGER_COUNT),
        (Role::Werewolf, WEREWOLF_COUNT),
        (Role::Seer, SEER_COUNT),
    ];

    let mut roster: Vec<Participant> = Vec::new();
    if let Some(seat) = external {
        for entry in needed.iter_mut() {
            if entry.0 == seat.role {
                entry.1 -= 1;
            }
        }
        roster.push(Participant {
            id: new_id(&mut rng),
            role: seat.role,
            kind: ParticipantKind::Remote {
                endpoint: seat.endpoint.clone(),
            },
        });
    }
    for (role, count) in needed {
        for _ in 0..count {
            roster.push(Participant {
                id: new_id(&mut rng),
                role,
                kind: ParticipantKind::Simulated,
            });
        }
    }

    // The first werewolf in roster order is the one night logic tracks.
    let werewolf_id = roster.iter().find(|p| p.role == Role::Werewolf).map(|p| p.id.clone());
    let seer_id = roster.iter().find(|p| p.role == Role::Seer).map(|p| p.id.clone());

    let mut order: Vec<String> = roster.iter().map(|p| p.id.clone()).collect();
    order.shuffle(&mut rng);

    let mut state = GameState::new(config.turns_to_speak_per_round);
    state.participants.insert(1, roster);
    state.werewolf_id = werewolf_id;
    state.seer_id = seer_id;
    // Round 1 starts with a shuffled order; bidding overwrites it.
    state.speaking_order.insert(1, order);
    state
}

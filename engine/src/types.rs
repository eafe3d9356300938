// ═══════════════════════════════════════════════════════════════════════
// Core types — roles, participants and the per-round record structs
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

// ── Enums ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Villager,
    Werewolf,
    Seer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Villager, Role::Werewolf, Role::Seer];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Villager => write!(f, "VILLAGER"),
            Role::Werewolf => write!(f, "WEREWOLF"),
            Role::Seer => write!(f, "SEER"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "VILLAGER" => Ok(Role::Villager),
            "WEREWOLF" => Ok(Role::Werewolf),
            "SEER" => Ok(Role::Seer),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EliminationType {
    NightKill,
    VotedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    WerewolfElimination,
    SeerInvestigation,
    NightEnd,
    BidPlaced,
    SpeakingOrderSet,
    Vote,
    VillageElimination,
    RoundEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Night,
    Bidding,
    Debate,
    Voting,
    RoundEnd,
    GameEnd,
}

/// Which side took the game. Serialized with the lowercase labels the
/// evaluation report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Villagers,
    Werewolf,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Villagers => write!(f, "villagers"),
            Winner::Werewolf => write!(f, "werewolf"),
        }
    }
}

// ── Participant ────────────────────────────────────────────────────────

/// How a participant's prompts are answered: over the wire to an external
/// agent endpoint, or by the local LLM backend standing in for one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipantKind {
    Remote { endpoint: String },
    Simulated,
}

/// One seat in a game. Identity and role are fixed at setup; liveness is
/// tracked by presence in the current round's roster, not by a flag here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub role: Role,
    pub kind: ParticipantKind,
}

impl Participant {
    pub fn is_remote(&self) -> bool {
        matches!(self.kind, ParticipantKind::Remote { .. })
    }
}

// ── Per-round records ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender_id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub participant_id: String,
    /// Intended range 0-100; out-of-range bids are kept as submitted.
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub voter_id: String,
    pub voted_for_id: String,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    pub eliminated_participant: String,
    pub elimination_type: EliminationType,
}

/// One entry of the seer's investigation history, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeerCheck {
    pub checked_player: String,
    pub is_werewolf: bool,
}

// ── Event log ──────────────────────────────────────────────────────────

/// Chronological audit entry; feeds analytics and prompt construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub event_type: EventType,
    pub player: Option<String>,
    pub eliminated_player: Option<String>,
    pub description: Option<String>,
}

impl Event {
    pub fn new(event_type: EventType) -> Self {
        Event {
            event_type,
            player: None,
            eliminated_player: None,
            description: None,
        }
    }
}

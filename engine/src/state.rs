// ═══════════════════════════════════════════════════════════════════════
// GameState — the single mutable aggregate for one game
//
// Every per-round collection is keyed by round number. A participant is
// alive iff it appears in participants[current_round]; eliminations only
// ever remove, so participants[r+1] ⊆ participants[r]. The werewolf/seer
// fields are denormalized ids into the roster, cleared by the elimination
// that removes them so night logic never chases a stale pointer.
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::GameError;
use crate::types::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub current_round: u32,
    pub winner: Option<Winner>,
    /// Debate passes per round, >= 1.
    pub turns_to_speak_per_round: u32,

    /// Round number → active roster for that round.
    pub participants: HashMap<u32, Vec<Participant>>,
    /// Tracked (first) live werewolf, cleared when eliminated.
    pub werewolf_id: Option<String>,
    /// Tracked live seer, cleared when eliminated.
    pub seer_id: Option<String>,

    /// Round number → debate order, produced by the bidding phase.
    pub speaking_order: HashMap<u32, Vec<String>>,
    pub chat_history: HashMap<u32, Vec<Message>>,
    pub bids: HashMap<u32, Vec<Bid>>,
    pub votes: HashMap<u32, Vec<Vote>>,
    /// Append-only audit trail of removals.
    pub eliminations: HashMap<u32, Vec<Elimination>>,
    pub events: HashMap<u32, Vec<Event>>,

    /// Full investigation history, order-sensitive.
    pub seer_checks: Vec<SeerCheck>,
    /// Most recent night-kill victim, surfaced to debate prompts.
    pub latest_werewolf_kill: Option<String>,
}

impl GameState {
    pub fn new(turns_to_speak_per_round: u32) -> Self {
        let mut state = GameState {
            current_round: 1,
            winner: None,
            turns_to_speak_per_round: turns_to_speak_per_round.max(1),
            participants: HashMap::new(),
            werewolf_id: None,
            seer_id: None,
            speaking_order: HashMap::new(),
            chat_history: HashMap::new(),
            bids: HashMap::new(),
            votes: HashMap::new(),
            eliminations: HashMap::new(),
            events: HashMap::new(),
            seer_checks: Vec::new(),
            latest_werewolf_kill: None,
        };
        state.seed_round_containers(1);
        state
    }

    fn seed_round_containers(&mut self, round: u32) {
        self.chat_history.entry(round).or_default();
        self.bids.entry(round).or_default();
        self.votes.entry(round).or_default();
        self.events.entry(round).or_default();
    }

    // ── Roster access ──────────────────────────────────────────────────

    /// The active roster for the current round.
    pub fn active_participants(&self) -> &[Participant] {
        self.participants
            .get(&self.current_round)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.active_participants().iter().find(|p| p.id == id)
    }

    pub fn is_alive(&self, id: &str) -> bool {
        self.participant(id).is_some()
    }

    /// The tracked werewolf, if it is still in the active roster.
    pub fn werewolf(&self) -> Option<&Participant> {
        self.werewolf_id.as_deref().and_then(|id| self.participant(id))
    }

    /// The tracked seer, if it is still in the active roster.
    pub fn seer(&self) -> Option<&Participant> {
        self.seer_id.as_deref().and_then(|id| self.participant(id))
    }

    // ── Mutation helpers ───────────────────────────────────────────────

    pub fn log_event(&mut self, round: u32, event: Event) {
        self.events.entry(round).or_default().push(event);
    }

    /// First write wins; the winner is terminal once set.
    pub fn declare_winner(&mut self, winner: Winner) {
        if self.winner.is_none() {
            self.winner = Some(winner);
        }
    }

    /// Remove a participant from the current round's roster and record the
    /// elimination. The denormalized werewolf/seer ids are recomputed here
    /// so they can never outlive the roster entry they point at.
    pub fn eliminate(
        &mut self,
        id: &str,
        elimination_type: EliminationType,
    ) -> Result<(), GameError> {
        if !self.is_alive(id) {
            return Err(GameError::UnknownParticipant { id: id.to_string() });
        }

        let round = self.current_round;
        if let Some(roster) = self.participants.get_mut(&round) {
            roster.retain(|p| p.id != id);
        }

        self.eliminations.entry(round).or_default().push(Elimination {
            eliminated_participant: id.to_string(),
            elimination_type,
        });

        if self.werewolf_id.as_deref() == Some(id) {
            self.werewolf_id = None;
        }
        if self.seer_id.as_deref() == Some(id) {
            self.seer_id = None;
        }
        Ok(())
    }

    /// Advance to the next round: the surviving roster carries forward as
    /// the new baseline and the new round's containers start empty.
    /// speaking_order is left to the bidding phase; eliminations are added
    /// as they happen.
    pub fn advance_round(&mut self) {
        let next = self.current_round + 1;
        let carried = self
            .participants
            .get(&self.current_round)
            .cloned()
            .unwrap_or_default();
        self.participants.insert(next, carried);
        self.seed_round_containers(next);
        self.current_round = next;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Prompt builders — all game context a participant needs is rendered
// into the prompt text, since every gateway call is a fresh conversation
// ═══════════════════════════════════════════════════════════════════════

use crate::state::GameState;
use crate::types::{Participant, Role};

const JSON_ONLY: &str = "IMPORTANT: You MUST respond with valid JSON only. Do not include any \
                         text, markdown, or explanation before or after the JSON object.";

fn context(participant: &Participant) -> String {
    format!(
        "You are a participant in a game of werewolf.\n\
         Your player ID: {}\n\
         Your role: {}",
        participant.id, participant.role
    )
}

fn bullet_list(ids: impl IntoIterator<Item = String>) -> String {
    let lines: Vec<String> = ids.into_iter().map(|id| format!("- {id}")).collect();
    if lines.is_empty() {
        "None".to_string()
    } else {
        lines.join("\n")
    }
}

pub fn game_rules() -> &'static str {
    "This is the game of werewolf. Villagers try to detect the werewolf; the werewolf \
     tries to avoid detection through deception and persuasion.\n\n\
     Each round starts with a NIGHT phase in which the werewolf secretly eliminates one \
     player and the seer investigates one player. Next, every player bids for speaking \
     order, then the debate runs in order of the highest bids. After the debate, every \
     player votes to eliminate one player; the player with the most votes is removed.\n\n\
     The game ends when the werewolf is eliminated (villagers win) or when at most one \
     non-werewolf player remains (werewolf wins). Otherwise the next round begins at NIGHT."
}

// ── Night ──────────────────────────────────────────────────────────────

pub fn werewolf_kill(state: &GameState, werewolf: &Participant) -> String {
    let targets = bullet_list(
        state
            .active_participants()
            .iter()
            .filter(|p| p.id != werewolf.id)
            .map(|p| p.id.clone()),
    );
    format!(
        "{}\n\n\
         ROUND {}:\n\n\
         YOU ARE THE WEREWOLF\n\n\
         Pick one participant to eliminate. Here is a list of the participants:\n{}\n\n\
         Be sure to also explain why you are choosing to eliminate this player.\n\n\
         Respond in JSON format:\n\
         {{\n    \"player_id\": \"the player ID you want to eliminate\",\n    \
         \"reason\": \"your explanation for why you are eliminating this player\"\n}}\n\n\
         {}",
        context(werewolf),
        state.current_round,
        targets,
        JSON_ONLY
    )
}

pub fn seer_investigation(state: &GameState, seer: &Participant) -> String {
    let checked: Vec<&str> = state
        .seer_checks
        .iter()
        .map(|c| c.checked_player.as_str())
        .collect();
    let unchecked = bullet_list(
        state
            .active_participants()
            .iter()
            .filter(|p| p.id != seer.id && !checked.contains(&p.id.as_str()))
            .map(|p| p.id.clone()),
    );
    let history = bullet_list(
        state
            .seer_checks
            .iter()
            .map(|c| format!("{} is werewolf: {}", c.checked_player, c.is_werewolf)),
    );
    format!(
        "{}\n\n\
         ROUND {}:\n\n\
         YOU ARE THE SEER\n\n\
         Pick one participant to investigate. If you already know who the werewolf is, \
         you don't have to investigate someone again.\n\n\
         Participants you have not checked:\n{}\n\n\
         Participants you have checked:\n{}\n\n\
         Explain why you are choosing to investigate this player.\n\n\
         Respond in JSON format:\n\
         {{\n    \"player_id\": \"the player ID you want to investigate\",\n    \
         \"reason\": \"your explanation for why you are investigating this player\"\n}}\n\n\
         {}",
        context(seer),
        state.current_round,
        unchecked,
        history,
        JSON_ONLY
    )
}

pub fn seer_reveal(seer: &Participant, checked_player: &str, is_werewolf: bool) -> String {
    format!(
        "{}\n\n\
         Here are the results of your investigation:\n\n\
         You investigated player: {}\n\
         They {} the werewolf",
        context(seer),
        checked_player,
        if is_werewolf { "are" } else { "are not" }
    )
}

// ── Bidding ────────────────────────────────────────────────────────────

pub fn bid(state: &GameState, participant: &Participant) -> String {
    let placed = bullet_list(
        state
            .bids
            .get(&state.current_round)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|b| format!("Participant {}: {} points", b.participant_id, b.amount)),
    );
    format!(
        "{}\n\n\
         It is time to place your bid for speaking order in the upcoming debate round.\n\
         Place a bid between 0 and 100 points. Higher bids speak earlier; consider your \
         strategy carefully based on the current state of the game.\n\n\
         Current bids from other participants:\n{}\n\n\
         Respond in JSON format:\n\
         {{\n    \"bid_amount\": <your_bid_amount>,\n    \
         \"reason\": \"your explanation for your bid\"\n}}\n\n\
         {}",
        context(participant),
        placed,
        JSON_ONLY
    )
}

// ── Debate ─────────────────────────────────────────────────────────────

pub fn debate(state: &GameState, participant: &Participant) -> String {
    let round = state.current_round;
    let night_info = match &state.latest_werewolf_kill {
        Some(victim) => format!("Last night, {victim} was eliminated by the werewolf."),
        None => String::new(),
    };
    let order = state
        .speaking_order
        .get(&round)
        .map(|o| o.join(", "))
        .unwrap_or_default();
    let chat: Vec<String> = state
        .chat_history
        .get(&round)
        .map(Vec::as_slice)
        .unwrap_or(&[])
        .iter()
        .map(|m| format!("{}: {}", m.sender_id, m.content))
        .collect();
    let chat = if chat.is_empty() {
        "No messages yet.".to_string()
    } else {
        chat.join("\n")
    };
    format!(
        "{}\n\n\
         ROUND {round} - Debate Phase\n\n\
         {night_info}\n\n\
         Speaking order: {order}\n\n\
         Conversation so far:\n{chat}\n\n\
         Share your thoughts with the group. Try to identify the werewolf (or deflect \
         suspicion if you are the werewolf).\n\n\
         Respond in JSON format:\n\
         {{\n    \"message\": \"your message to the group\"\n}}\n\n\
         {}",
        context(participant),
        JSON_ONLY
    )
}

// ── Voting ─────────────────────────────────────────────────────────────

pub fn vote(state: &GameState, participant: &Participant) -> String {
    let round = state.current_round;
    let chat: Vec<String> = state
        .chat_history
        .get(&round)
        .map(Vec::as_slice)
        .unwrap_or(&[])
        .iter()
        .map(|m| format!("{} - {}", m.sender_id, m.content))
        .collect();
    let chat = if chat.is_empty() {
        "No messages yet.".to_string()
    } else {
        chat.join("\n")
    };
    // Self-exclusion is a prompt choice, not enforced by the tally.
    let candidates = bullet_list(
        state
            .active_participants()
            .iter()
            .filter(|p| p.id != participant.id)
            .map(|p| p.id.clone()),
    );
    format!(
        "{}\n\n\
         It's time to vote for a player to eliminate.\n\n\
         Here is all of the conversations from this round:\n{chat}\n\n\
         Pick a single player to eliminate and provide an explanation as to why.\n\
         Here are the players to choose from:\n{candidates}\n\n\
         Respond in JSON format:\n\
         {{\n    \"player_id\": \"the player ID you want to eliminate\",\n    \
         \"reason\": \"your explanation for why you are eliminating this player\"\n}}\n\n\
         {}",
        context(participant),
        JSON_ONLY
    )
}

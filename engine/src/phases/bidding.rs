// ═══════════════════════════════════════════════════════════════════════
// Bidding phase — every active participant bids for speaking order
// ═══════════════════════════════════════════════════════════════════════

use tracing::{debug, info};

use crate::error::GameError;
use crate::gateway::{BidReply, Gateway};
use crate::prompts;
use crate::state::GameState;
use crate::types::{Bid, Event, EventType};

pub fn run(state: &mut GameState, gateway: &Gateway) -> Result<(), GameError> {
    debug!(round = state.current_round, "bidding phase");
    collect_round_bids(state, gateway)?;
    tally_bids_and_set_order(state);
    Ok(())
}

fn collect_round_bids(state: &mut GameState, gateway: &Gateway) -> Result<(), GameError> {
    let round = state.current_round;
    // Roster order, not randomized; each prompt shows the bids already in.
    let roster = state.active_participants().to_vec();

    for participant in roster {
        let prompt = prompts::bid(state, &participant);
        let reply: BidReply = gateway.ask(&participant, &prompt)?;
        info!(bidder = %participant.id, amount = reply.bid_amount, "bid placed");

        state.bids.entry(round).or_default().push(Bid {
            participant_id: participant.id.clone(),
            amount: reply.bid_amount,
        });
        state.log_event(
            round,
            Event {
                player: Some(participant.id.clone()),
                description: Some(format!(
                    "Placed a bid of {} points for rationale: {}",
                    reply.bid_amount, reply.reason
                )),
                ..Event::new(EventType::BidPlaced)
            },
        );
    }
    Ok(())
}

/// Highest bid speaks first. The sort is stable, so equal bids keep the
/// order in which they were submitted.
pub(crate) fn tally_bids_and_set_order(state: &mut GameState) {
    let round = state.current_round;
    let mut sorted = state.bids.get(&round).cloned().unwrap_or_default();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount));

    let order: Vec<String> = sorted.into_iter().map(|b| b.participant_id).collect();
    state.log_event(
        round,
        Event {
            player: Some("System".to_string()),
            description: Some(format!(
                "Speaking order for round {} set as: {}",
                round,
                order.join(", ")
            )),
            ..Event::new(EventType::SpeakingOrderSet)
        },
    );
    state.speaking_order.insert(round, order);
}

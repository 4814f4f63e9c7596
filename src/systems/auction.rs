//! Sejm majority auction
//!
//! Highest bid takes the majority and pays for it. A tie at the top, or a
//! top bid of zero, leaves the sejm without a majority and nobody pays.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::error::{Result, RuleViolation};
use crate::core::types::{PlayerId, ProvinceId};
use crate::systems::influence::sole_controller;
use crate::world::WorldState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionOutcome {
    /// Sejm cancelled this round
    Skipped,
    /// Nobody bid more than 0
    NoBids,
    /// Several players share the top bid
    Tie { bid: u32, tied: Vec<PlayerId> },
    Won {
        player: PlayerId,
        bid: u32,
        /// Won through the Wielkopolska tie-break
        tiebreak: bool,
    },
}

impl AuctionOutcome {
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            AuctionOutcome::Won { player, .. } => Some(*player),
            _ => None,
        }
    }
}

/// Record a player's bid, rejecting anything above their gold
pub fn place_bid(world: &mut WorldState, player: PlayerId, amount: u32) -> Result<()> {
    let p = world.player_mut(player);
    if amount > p.gold {
        return Err(RuleViolation::BidOutOfRange { max: p.gold }.into());
    }
    p.last_bid = amount;
    debug!(player = %p.name, bid = amount, "bid placed");
    Ok(())
}

/// Settle the auction from every player's `last_bid`
pub fn resolve_auction(world: &mut WorldState) -> AuctionOutcome {
    if world.round.modifiers.sejm_cancelled {
        return AuctionOutcome::Skipped;
    }

    let top = world.players.iter().map(|p| p.last_bid).max().unwrap_or(0);
    if top == 0 {
        clear_majority(world);
        info!("auction: no bids above zero, no majority");
        return AuctionOutcome::NoBids;
    }

    let tied: Vec<PlayerId> = world
        .player_ids()
        .filter(|&id| world.player(id).last_bid == top)
        .collect();

    let (winner, tiebreak) = match tied.as_slice() {
        [only] => (*only, false),
        _ => match tiebreak_winner(world, &tied) {
            Some(w) => (w, true),
            None => {
                clear_majority(world);
                info!(bid = top, tied = tied.len(), "auction tied, no majority");
                return AuctionOutcome::Tie { bid: top, tied };
            }
        },
    };

    for (i, p) in world.players.iter_mut().enumerate() {
        p.majority = i == winner.index();
    }
    let p = world.player_mut(winner);
    p.gold -= top;
    info!(player = %p.name, bid = top, tiebreak, "auction won");

    AuctionOutcome::Won { player: winner, bid: top, tiebreak }
}

/// With the Środa sejmik in force, the sole controller of Wielkopolska
/// takes a tie it is part of
fn tiebreak_winner(world: &WorldState, tied: &[PlayerId]) -> Option<PlayerId> {
    if !world.round.modifiers.wielkopolska_tiebreak {
        return None;
    }
    sole_controller(world, ProvinceId::Wielkopolska).filter(|c| tied.contains(c))
}

fn clear_majority(world: &mut WorldState) {
    for p in &mut world.players {
        p.majority = false;
    }
}

use crate::core::error::{Result, SejmError};
use crate::core::types::PlayerId;
use crate::game::report::RoundReport;
use crate::phases::{DecisionRequest, Lines, Phase, PhaseKind};
use crate::systems::auction::{place_bid, resolve_auction, AuctionOutcome};
use crate::world::WorldState;

/// Every player bids once, leader first
#[derive(Debug, Default)]
pub struct AuctionPhase {
    bidders: Vec<PlayerId>,
    next: usize,
}

impl Phase for AuctionPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Auction
    }

    fn on_enter(&mut self, world: &mut WorldState, _report: &mut RoundReport) -> Lines {
        if world.round.modifiers.sejm_cancelled {
            return vec!["The sejm is cancelled; no auction this round.".to_string()];
        }
        self.bidders = world.turn_order();
        Vec::new()
    }

    fn next_decision(&self, world: &WorldState) -> Option<DecisionRequest> {
        let player = *self.bidders.get(self.next)?;
        let p = world.player(player);
        Some(DecisionRequest::new(
            player,
            format!("{}, your bid for the majority (0-{})", p.name, p.gold),
        ))
    }

    fn apply_decision(&mut self, world: &mut WorldState, answer: &str, _report: &mut RoundReport) -> Result<Lines> {
        let Some(&player) = self.bidders.get(self.next) else {
            return Ok(Vec::new());
        };
        let amount = match answer.trim() {
            "" => 0,
            text => text
                .parse::<u32>()
                .map_err(|_| SejmError::parse(format!("'{}' is not a bid", text)))?,
        };
        place_bid(world, player, amount)?;
        self.next += 1;
        Ok(vec![format!("{} bids {}.", world.name(player), amount)])
    }

    fn on_exit(&mut self, world: &mut WorldState, report: &mut RoundReport) -> Lines {
        let outcome = resolve_auction(world);
        let line = match &outcome {
            AuctionOutcome::Skipped => None,
            AuctionOutcome::NoBids => Some("Nobody bid; the sejm has no majority.".to_string()),
            AuctionOutcome::Tie { bid, .. } => Some(format!("Tie at {}; the sejm has no majority.", bid)),
            AuctionOutcome::Won { player, bid, tiebreak } => Some(format!(
                "{} wins the majority for {} gold{}.",
                world.name(*player),
                bid,
                if *tiebreak { " (Środa tie-break)" } else { "" }
            )),
        };
        report.auction = Some(outcome);
        line.into_iter().collect()
    }
}

//! Round phases
//!
//! A round is a fixed list of phases. Each phase gets a chance to act on
//! entry, then asks for decisions one at a time until it has none left,
//! then closes. Phases never read input themselves: they describe what
//! they need as a `DecisionRequest` and the orchestrator feeds the answer
//! back through `apply_decision`.

mod actions;
mod auction;
mod events;
mod income;
mod invaders;
mod sejm;
mod war;

pub use actions::ActionsPhase;
pub use auction::AuctionPhase;
pub use events::EventsPhase;
pub use income::IncomePhase;
pub use invaders::{AttackInvadersPhase, DevastationPhase, EnemyReinforcementPhase};
pub use sejm::SejmPhase;
pub use war::PlayerBattlePhase;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::PlayerId;
use crate::game::report::RoundReport;
use crate::world::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Events,
    Income,
    Auction,
    Sejm,
    Actions,
    PlayerBattle,
    EnemyReinforcement,
    AttackInvaders,
    Devastation,
}

impl PhaseKind {
    pub fn name(self) -> &'static str {
        match self {
            PhaseKind::Events => "Events",
            PhaseKind::Income => "Income",
            PhaseKind::Auction => "Auction",
            PhaseKind::Sejm => "Sejm",
            PhaseKind::Actions => "Actions",
            PhaseKind::PlayerBattle => "Battles",
            PhaseKind::EnemyReinforcement => "Invader reinforcements",
            PhaseKind::AttackInvaders => "Attacks on invaders",
            PhaseKind::Devastation => "Devastation",
        }
    }
}

/// One question for one player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRequest {
    pub player: PlayerId,
    pub prompt: String,
}

impl DecisionRequest {
    pub fn new(player: PlayerId, prompt: impl Into<String>) -> Self {
        Self { player, prompt: prompt.into() }
    }
}

/// Lines of text a phase wants shown
pub type Lines = Vec<String>;

pub trait Phase {
    fn kind(&self) -> PhaseKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn on_enter(&mut self, world: &mut WorldState, report: &mut RoundReport) -> Lines;

    /// The next question, or `None` once the phase is finished
    fn next_decision(&self, _world: &WorldState) -> Option<DecisionRequest> {
        None
    }

    /// Apply one answer. Recoverable errors leave the world untouched and
    /// the same request is asked again.
    fn apply_decision(
        &mut self,
        _world: &mut WorldState,
        _answer: &str,
        _report: &mut RoundReport,
    ) -> Result<Lines> {
        Ok(Vec::new())
    }

    fn on_exit(&mut self, _world: &mut WorldState, _report: &mut RoundReport) -> Lines {
        Vec::new()
    }
}

/// Fresh phases for one round, in play order
pub fn round_phases() -> Vec<Box<dyn Phase>> {
    vec![
        Box::new(EventsPhase::default()),
        Box::new(IncomePhase),
        Box::new(AuctionPhase::default()),
        Box::new(SejmPhase::default()),
        Box::new(ActionsPhase::default()),
        Box::new(PlayerBattlePhase),
        Box::new(EnemyReinforcementPhase),
        Box::new(AttackInvadersPhase::default()),
        Box::new(DevastationPhase),
    ]
}

/// Split an answer on whitespace
pub(crate) fn words(answer: &str) -> Vec<&str> {
    answer.split_whitespace().collect()
}

//! Round bookkeeping and per-round rule overrides

use serde::{Deserialize, Serialize};

use crate::core::types::{LawVariant, PlayerId, Round};

/// Default gold gained from the administer action
pub const DEFAULT_ADMIN_YIELD: u32 = 2;

/// Overrides set by the round's event, all cleared at round start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundModifiers {
    /// Auction and legislation are skipped
    pub sejm_cancelled: bool,
    /// Gold from the administer action
    pub admin_yield: u32,
    /// Subtracted from per-estate income in Prusy
    pub prusy_estate_penalty: u32,
    /// Subtracted from influence and build costs in Litwa
    pub litwa_discount: u32,
    /// Attacks on the Tatars earn one extra honor per roll
    pub extra_honor_vs_tatars: bool,
    pub recruit_cost: Option<u32>,
    pub enrich_cost: Option<u32>,
    /// Everyone gains 1 gold before province income
    pub royal_fairs: bool,
    /// Each player's first invader attack rolls one extra die
    pub crown_artillery: bool,
    /// Players who already used the artillery die this round
    pub artillery_used: Vec<PlayerId>,
    /// Auction ties go to the sole controller of Wielkopolska
    pub wielkopolska_tiebreak: bool,
    pub wielkopolska_influence_cost: Option<u32>,
    pub wielkopolska_estate_cost: Option<u32>,
}

impl Default for RoundModifiers {
    fn default() -> Self {
        Self {
            sejm_cancelled: false,
            admin_yield: DEFAULT_ADMIN_YIELD,
            prusy_estate_penalty: 0,
            litwa_discount: 0,
            extra_honor_vs_tatars: false,
            recruit_cost: None,
            enrich_cost: None,
            royal_fairs: false,
            crown_artillery: false,
            artillery_used: Vec::new(),
            wielkopolska_tiebreak: false,
            wielkopolska_influence_cost: None,
            wielkopolska_estate_cost: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStatus {
    pub current_round: Round,
    pub total_rounds: Round,
    /// Acts first this round; rotates every round
    pub marshal: PlayerId,
    /// Law number (1..=6) chosen this round
    pub last_law: Option<u8>,
    pub last_law_variant: Option<LawVariant>,
    pub modifiers: RoundModifiers,
}

impl RoundStatus {
    pub fn new(total_rounds: Round) -> Self {
        Self {
            current_round: 1,
            total_rounds,
            marshal: PlayerId(0),
            last_law: None,
            last_law_variant: None,
            modifiers: RoundModifiers::default(),
        }
    }

    /// Clear everything that only lasts one round
    pub fn reset_for_round(&mut self) {
        self.last_law = None;
        self.last_law_variant = None;
        self.modifiers = RoundModifiers::default();
    }

    /// Move to the next round and pass the marshal's staff on
    pub fn advance(&mut self, player_count: usize) {
        assert!(player_count > 0, "cannot rotate marshal among zero players");
        self.current_round += 1;
        self.marshal = PlayerId((self.marshal.index() + 1) % player_count);
        self.reset_for_round();
    }

    pub fn is_final_round(&self) -> bool {
        self.current_round >= self.total_rounds
    }

    /// Every round has been played
    pub fn is_complete(&self) -> bool {
        self.current_round > self.total_rounds
    }
}

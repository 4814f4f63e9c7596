use serde::{Deserialize, Serialize};

/// A seat at the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Final score; only meaningful after scoring
    pub score: u32,
    pub gold: u32,
    pub honor: u32,
    /// Holds the sejm majority this round
    pub majority: bool,
    /// Bid placed in this round's auction
    pub last_bid: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, gold: u32) -> Self {
        Self {
            name: name.into(),
            score: 0,
            gold,
            honor: 0,
            majority: false,
            last_bid: 0,
        }
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.gold >= cost
    }

    /// Pay `cost`, or leave gold untouched and return false
    pub fn try_spend(&mut self, cost: u32) -> bool {
        if self.gold < cost {
            return false;
        }
        self.gold -= cost;
        true
    }

    pub fn reset_for_round(&mut self) {
        self.majority = false;
        self.last_bid = 0;
    }
}

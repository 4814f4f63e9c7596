//! Round income: control and estates
//!
//! A sole controller collects 1 gold per province. Estates pay by wealth:
//! 0 or 1 pays nothing, 2 pays 1, 3 pays 2. Wielkopolska only pays the
//! estates of its sole controller, and nothing at all while contested.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{PlayerId, ProvinceId};
use crate::systems::influence::sole_controller;
use crate::world::WorldState;

/// Gold for solely controlling a province
pub const CONTROL_INCOME: u32 = 1;

/// Gold per estate at a given wealth level
pub fn estate_income(wealth: u8) -> u32 {
    match wealth {
        0 | 1 => 0,
        2 => 1,
        _ => 2,
    }
}

/// What one player earned this round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeLine {
    pub player: usize,
    /// From the royal fairs event
    pub bonus: u32,
    pub control: u32,
    pub estates: u32,
}

impl IncomeLine {
    pub fn total(&self) -> u32 {
        self.bonus + self.control + self.estates
    }
}

/// Income breakdown for all players, seating order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeResult {
    pub lines: Vec<IncomeLine>,
}

/// Pay every player their round income
pub fn collect_income(world: &mut WorldState) -> IncomeResult {
    let mut lines: Vec<IncomeLine> = (0..world.player_count())
        .map(|player| IncomeLine { player, ..Default::default() })
        .collect();
    let modifiers = world.round.modifiers.clone();

    if modifiers.royal_fairs {
        for line in &mut lines {
            line.bonus += 1;
        }
    }

    for province in ProvinceId::ALL {
        let single = sole_controller(world, province);
        if let Some(ctrl) = single {
            lines[ctrl.index()].control += CONTROL_INCOME;
        }

        let prov = world.province(province);
        let mut per_estate = estate_income(prov.wealth);
        if province == ProvinceId::Prusy {
            per_estate = per_estate.saturating_sub(modifiers.prusy_estate_penalty);
        }
        if per_estate == 0 {
            continue;
        }

        for owner in prov.estate_owners() {
            let pays = province != ProvinceId::Wielkopolska || single == Some(owner);
            if pays {
                lines[owner.index()].estates += per_estate;
            }
        }
    }

    for line in &lines {
        let player = world.player_mut(PlayerId(line.player));
        player.gold += line.total();
        debug!(
            player = %player.name,
            control = line.control,
            estates = line.estates,
            bonus = line.bonus,
            "income collected"
        );
    }

    IncomeResult { lines }
}

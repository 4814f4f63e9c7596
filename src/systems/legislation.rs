//! Laws passed by the sejm majority
//!
//! Numbers 1 and 2 are both Taxation, 3 and 4 are both Levy, 5 is
//! Fortification and 6 is Peace. The effects are split into small
//! functions because several of them need a further choice (a province, a
//! raid track) from one player or another.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::error::{Result, RuleViolation, SejmError};
use crate::core::types::{LawVariant, PlayerId, ProvinceId, RaidTrackId};
use crate::systems::influence::{sole_controller, solely_controlled_by};
use crate::world::WorldState;

/// Gold every player receives under Taxation A
pub const TAX_A_GOLD: u32 = 2;
/// Gold every player receives under Taxation B
pub const TAX_B_GOLD: u32 = 1;
/// Total gold the majority holder receives under Taxation B
pub const TAX_B_HOLDER_GOLD: u32 = 4;
/// Track reduction for Levy B and Peace B
pub const SINGLE_TRACK_RELIEF: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Law {
    Taxation,
    Levy,
    Fortification,
    Peace,
}

impl Law {
    pub fn from_number(n: u8) -> Option<Law> {
        match n {
            1 | 2 => Some(Law::Taxation),
            3 | 4 => Some(Law::Levy),
            5 => Some(Law::Fortification),
            6 => Some(Law::Peace),
            _ => None,
        }
    }

    /// Fortification has a single effect; every other law asks for A or B
    pub fn has_variants(self) -> bool {
        !matches!(self, Law::Fortification)
    }

    pub fn name(self) -> &'static str {
        match self {
            Law::Taxation => "Taxation",
            Law::Levy => "Levy",
            Law::Fortification => "Fortification",
            Law::Peace => "Peace",
        }
    }
}

impl fmt::Display for Law {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One visible consequence of a law
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LawEffect {
    Taxed { variant: LawVariant, holder: PlayerId },
    TroopLevied { player: PlayerId, province: ProvinceId },
    TrackReduced { track: RaidTrackId, by: u32, now: u32 },
    FortBuilt { player: PlayerId, province: ProvinceId },
}

/// The majority holder picks a law by number. Fails without a majority.
pub fn select_law(world: &mut WorldState, number: u8) -> Result<Law> {
    if world.majority_holder().is_none() {
        return Err(SejmError::parse("nobody holds the majority"));
    }
    let law = Law::from_number(number)
        .ok_or_else(|| SejmError::parse(format!("law must be 1..6, got {}", number)))?;
    world.round.last_law = Some(number);
    world.round.last_law_variant = None;
    info!(law = %law, number, "law selected");
    Ok(law)
}

pub fn record_variant(world: &mut WorldState, variant: LawVariant) {
    world.round.last_law_variant = Some(variant);
}

/// Taxation: A gives everyone 2, B gives everyone 1 and the holder 4 in total
pub fn apply_taxation(world: &mut WorldState, variant: LawVariant, holder: PlayerId) -> LawEffect {
    match variant {
        LawVariant::A => {
            for p in &mut world.players {
                p.gold += TAX_A_GOLD;
            }
        }
        LawVariant::B => {
            for p in &mut world.players {
                p.gold += TAX_B_GOLD;
            }
            world.player_mut(holder).gold += TAX_B_HOLDER_GOLD - TAX_B_GOLD;
        }
    }
    LawEffect::Taxed { variant, holder }
}

pub fn reduce_track(world: &mut WorldState, track: RaidTrackId, by: u32) -> LawEffect {
    let t = world.track_mut(track);
    t.reduce(by);
    LawEffect::TrackReduced { track, by, now: t.value }
}

/// Peace A: every track eases by one
pub fn apply_general_peace(world: &mut WorldState) -> Vec<LawEffect> {
    RaidTrackId::ALL
        .into_iter()
        .map(|track| reduce_track(world, track, 1))
        .collect()
}

/// Provinces where a Levy A troop may be placed
pub fn levy_options(world: &WorldState, player: PlayerId) -> Vec<ProvinceId> {
    solely_controlled_by(world, player)
}

pub fn place_levy(world: &mut WorldState, player: PlayerId, province: ProvinceId) -> Result<LawEffect> {
    if sole_controller(world, province) != Some(player) {
        return Err(RuleViolation::NotSoleController(province).into());
    }
    world.troops.add(province, player, 1);
    Ok(LawEffect::TroopLevied { player, province })
}

/// Solely controlled provinces still lacking a fort
pub fn fort_options(world: &WorldState, player: PlayerId) -> Vec<ProvinceId> {
    solely_controlled_by(world, player)
        .into_iter()
        .filter(|&p| !world.province(p).has_fort)
        .collect()
}

pub fn place_fort(world: &mut WorldState, player: PlayerId, province: ProvinceId) -> Result<LawEffect> {
    if sole_controller(world, province) != Some(player) {
        return Err(RuleViolation::NotSoleController(province).into());
    }
    if world.province(province).has_fort {
        return Err(RuleViolation::FortExists(province).into());
    }
    world.province_mut(province).has_fort = true;
    Ok(LawEffect::FortBuilt { player, province })
}

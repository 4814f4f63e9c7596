//! Player actions of the action phase
//!
//! Each action is validated in full before anything changes, so a rejected
//! action leaves the world untouched and the player simply tries again.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{Result, RuleViolation, SejmError};
use crate::core::types::{normalize, PlayerId, ProvinceId};
use crate::world::{WorldState, MAX_WEALTH};

/// Base cost of influence, build, recruit and enrich
pub const BASE_ACTION_COST: u32 = 2;

/// Actions every player takes per round
pub const ACTIONS_PER_ROUND: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Place a noble
    Influence(ProvinceId),
    /// Place an estate where you have a noble
    Build(ProvinceId),
    /// Raise a troop where you have a noble
    Recruit(ProvinceId),
    /// Move one troop between two provinces where you have nobles
    March { from: ProvinceId, to: ProvinceId },
    /// Raise a province's wealth
    Enrich(ProvinceId),
    /// Collect the administration yield
    Administer,
}

impl PlayerAction {
    pub fn keyword(&self) -> &'static str {
        match self {
            PlayerAction::Influence(_) => "influence",
            PlayerAction::Build(_) => "build",
            PlayerAction::Recruit(_) => "recruit",
            PlayerAction::March { .. } => "march",
            PlayerAction::Enrich(_) => "enrich",
            PlayerAction::Administer => "administer",
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Influence(p)
            | PlayerAction::Build(p)
            | PlayerAction::Recruit(p)
            | PlayerAction::Enrich(p) => write!(f, "{} {}", self.keyword(), p),
            PlayerAction::March { from, to } => write!(f, "march {} -> {}", from, to),
            PlayerAction::Administer => f.write_str("administer"),
        }
    }
}

impl FromStr for PlayerAction {
    type Err = SejmError;

    /// `<keyword> [province] [province]`; English or Polish keywords
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = normalize(s);
        let mut words = normalized.split_whitespace();
        let keyword = words
            .next()
            .ok_or_else(|| SejmError::parse("empty action"))?;
        let args: Vec<&str> = words.collect();

        let province = |i: usize| -> std::result::Result<ProvinceId, SejmError> {
            args.get(i)
                .ok_or_else(|| SejmError::parse(format!("'{}' needs a province", keyword)))?
                .parse()
        };

        let action = match keyword {
            "influence" | "wplyw" | "i" => PlayerAction::Influence(province(0)?),
            "build" | "posiadlosc" | "b" => PlayerAction::Build(province(0)?),
            "recruit" | "rekrutacja" | "r" => PlayerAction::Recruit(province(0)?),
            "march" | "marsz" | "m" => PlayerAction::March {
                from: province(0)?,
                to: province(1)?,
            },
            "enrich" | "zamoznosc" | "e" => PlayerAction::Enrich(province(0)?),
            "administer" | "administracja" | "a" => PlayerAction::Administer,
            other => return Err(SejmError::parse(format!("unknown action '{}'", other))),
        };
        Ok(action)
    }
}

/// A successfully applied action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: PlayerAction,
    /// Gold paid (negative gains are reported through `gained`)
    pub cost: u32,
    pub gained: u32,
    pub gold_after: u32,
}

/// Gold an action costs this round, after event modifiers
pub fn action_cost(world: &WorldState, action: &PlayerAction) -> u32 {
    let m = &world.round.modifiers;
    match *action {
        PlayerAction::Influence(p) => {
            let mut cost = BASE_ACTION_COST;
            if p == ProvinceId::Wielkopolska {
                cost = m.wielkopolska_influence_cost.unwrap_or(cost);
            }
            if p == ProvinceId::Litwa {
                cost = cost.saturating_sub(m.litwa_discount);
            }
            cost
        }
        PlayerAction::Build(p) => {
            let mut cost = BASE_ACTION_COST;
            if p == ProvinceId::Wielkopolska {
                cost = m.wielkopolska_estate_cost.unwrap_or(cost);
            }
            if p == ProvinceId::Litwa {
                cost = cost.saturating_sub(m.litwa_discount);
            }
            cost
        }
        PlayerAction::Recruit(_) => m.recruit_cost.unwrap_or(BASE_ACTION_COST),
        PlayerAction::Enrich(_) => m.enrich_cost.unwrap_or(BASE_ACTION_COST),
        PlayerAction::March { .. } | PlayerAction::Administer => 0,
    }
}

/// Check an action against the current world without changing it
pub fn validate_action(world: &WorldState, player: PlayerId, action: &PlayerAction) -> Result<u32> {
    let need_noble = |p: ProvinceId| -> Result<()> {
        if world.has_noble(p, player) {
            Ok(())
        } else {
            Err(RuleViolation::NoNoble(p).into())
        }
    };

    match *action {
        PlayerAction::Influence(_) | PlayerAction::Administer => {}
        PlayerAction::Build(p) => {
            need_noble(p)?;
            if world.province(p).free_slots() == 0 {
                return Err(RuleViolation::NoFreeEstateSlot(p).into());
            }
        }
        PlayerAction::Recruit(p) => need_noble(p)?,
        PlayerAction::March { from, to } => {
            if from == to {
                return Err(RuleViolation::SameProvince(from).into());
            }
            need_noble(from)?;
            need_noble(to)?;
            if world.troops.get(from, player) == 0 {
                return Err(RuleViolation::NoTroops(from).into());
            }
        }
        PlayerAction::Enrich(p) => {
            if world.province(p).wealth >= MAX_WEALTH {
                return Err(RuleViolation::WealthAtCap(p).into());
            }
        }
    }

    let cost = action_cost(world, action);
    let available = world.player(player).gold;
    if available < cost {
        return Err(RuleViolation::InsufficientGold { cost, available }.into());
    }
    Ok(cost)
}

/// Validate and apply one action
pub fn perform_action(world: &mut WorldState, player: PlayerId, action: PlayerAction) -> Result<ActionRecord> {
    let cost = validate_action(world, player, &action)?;
    let mut gained = 0;

    match action {
        PlayerAction::Influence(p) => world.nobles.add(p, player, 1),
        PlayerAction::Build(p) => {
            world.province_mut(p).build_estate(player);
        }
        PlayerAction::Recruit(p) => world.troops.add(p, player, 1),
        PlayerAction::March { from, to } => {
            world.troops.remove(from, player, 1);
            world.troops.add(to, player, 1);
        }
        PlayerAction::Enrich(p) => {
            world.province_mut(p).enrich();
        }
        PlayerAction::Administer => gained = world.round.modifiers.admin_yield,
    }

    let p = world.player_mut(player);
    p.gold = p.gold - cost + gained;
    debug!(player = %p.name, action = %action, cost, gained, "action performed");

    Ok(ActionRecord {
        player,
        action,
        cost,
        gained,
        gold_after: p.gold,
    })
}

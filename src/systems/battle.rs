//! Player-vs-player battles
//!
//! Wherever two or more players keep troops in the same province they
//! fight pairwise duels until at most one of them remains. In a duel every
//! troop rolls one die and each 5 or 6 kills an enemy troop. Both sides
//! roll before losses are applied.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::dice::{roll_many, Roll};
use crate::core::types::{PlayerId, ProvinceId};
use crate::world::WorldState;

/// Lowest roll that kills
pub const KILL_ROLL: Roll = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelResult {
    pub province: ProvinceId,
    pub first: PlayerId,
    pub second: PlayerId,
    pub first_rolls: Vec<Roll>,
    pub second_rolls: Vec<Roll>,
    pub first_losses: u32,
    pub second_losses: u32,
    pub first_remaining: u32,
    pub second_remaining: u32,
}

pub fn count_kills(rolls: &[Roll]) -> u32 {
    rolls.iter().filter(|&&r| r >= KILL_ROLL).count() as u32
}

/// Resolve one duel with the given rolls
///
/// Each side's losses are the opponent's kills, capped at that side's
/// troops at duel start. Both are applied together.
pub fn resolve_duel(
    world: &mut WorldState,
    province: ProvinceId,
    first: PlayerId,
    second: PlayerId,
    first_rolls: Vec<Roll>,
    second_rolls: Vec<Roll>,
) -> DuelResult {
    let first_units = world.troops.get(province, first);
    let second_units = world.troops.get(province, second);

    let first_losses = count_kills(&second_rolls).min(first_units);
    let second_losses = count_kills(&first_rolls).min(second_units);

    world.troops.remove(province, first, first_losses);
    world.troops.remove(province, second, second_losses);

    DuelResult {
        province,
        first,
        second,
        first_rolls,
        second_rolls,
        first_losses,
        second_losses,
        first_remaining: world.troops.get(province, first),
        second_remaining: world.troops.get(province, second),
    }
}

/// Fight out one province, rolling dice from `rng`
pub fn resolve_province_battles<R: Rng + ?Sized>(
    world: &mut WorldState,
    province: ProvinceId,
    rng: &mut R,
) -> Vec<DuelResult> {
    let order = world.turn_order();
    let mut duels = Vec::new();

    loop {
        let fighters: Vec<PlayerId> = order
            .iter()
            .copied()
            .filter(|&p| world.troops.get(province, p) > 0)
            .collect();
        let (first, second) = match fighters.as_slice() {
            [a, b, ..] => (*a, *b),
            _ => break,
        };

        let first_rolls = roll_many(rng, world.troops.get(province, first));
        let second_rolls = roll_many(rng, world.troops.get(province, second));
        let duel = resolve_duel(world, province, first, second, first_rolls, second_rolls);
        debug!(
            province = %province,
            first = %world.name(first),
            second = %world.name(second),
            first_losses = duel.first_losses,
            second_losses = duel.second_losses,
            "duel"
        );
        duels.push(duel);
    }

    duels
}

/// Resolve every contested province in map order
pub fn resolve_all_battles(world: &mut WorldState) -> Vec<DuelResult> {
    // Roll from a copy so the world stays mutably borrowable; written back after
    let mut rng = world.rng.clone();
    let mut duels = Vec::new();
    for province in ProvinceId::ALL {
        let fought = resolve_province_battles(world, province, &mut rng);
        if !fought.is_empty() {
            info!(province = %province, duels = fought.len(), "battle resolved");
        }
        duels.extend(fought);
    }
    world.rng = rng;
    duels
}

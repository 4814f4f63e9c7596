//! Invaders: reinforcement, player attacks and devastation
//!
//! Each raid track grows a little every round. Players may spend troops in
//! a track's source provinces to push it back and earn honor. Whatever is
//! still at 3 or more at the end of the round devastates a province.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::dice::{roll_d6, roll_many, Roll};
use crate::core::error::{Result, RuleViolation};
use crate::core::types::{PlayerId, ProvinceId, RaidTrackId};
use crate::world::{WorldState, POST_DEVASTATION_VALUE};

/// Track growth for a reinforcement roll
pub fn reinforcement_delta(roll: Roll) -> u32 {
    match roll {
        1 | 2 => 0,
        3 | 4 => 1,
        _ => 2,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reinforcement {
    pub track: RaidTrackId,
    pub roll: Roll,
    pub delta: u32,
    pub now: u32,
}

/// Roll one die per track and raise it accordingly
pub fn reinforce_tracks(world: &mut WorldState) -> Vec<Reinforcement> {
    RaidTrackId::ALL
        .into_iter()
        .map(|track| {
            let roll = roll_d6(&mut world.rng);
            let delta = reinforcement_delta(roll);
            let t = world.track_mut(track);
            t.raise(delta);
            debug!(track = %track, roll, delta, now = t.value, "reinforcement");
            Reinforcement { track, roll, delta, now: t.value }
        })
        .collect()
}

/// Outcome of one player's attack on a raid track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackResult {
    pub player: PlayerId,
    pub track: RaidTrackId,
    pub province: ProvinceId,
    pub rolls: Vec<Roll>,
    pub track_reduced: u32,
    pub units_lost: u32,
    pub honor_gained: u32,
    pub track_now: u32,
    /// An extra die came from the crown artillery
    pub artillery: bool,
}

/// Check an attack without touching the world
pub fn validate_attack(
    world: &WorldState,
    player: PlayerId,
    track: RaidTrackId,
    province: ProvinceId,
) -> Result<()> {
    if !track.attack_sources().contains(&province) {
        return Err(RuleViolation::NotAnAttackSource { track, province }.into());
    }
    if world.troops.get(province, player) == 0 {
        return Err(RuleViolation::NoTroops(province).into());
    }
    if world.track(track).value == 0 {
        return Err(RuleViolation::TrackCleared(track).into());
    }
    Ok(())
}

/// How many dice the player would roll, and whether artillery adds one
pub fn attack_dice(world: &WorldState, player: PlayerId, province: ProvinceId) -> (u32, bool) {
    let units = world.troops.get(province, player);
    let modifiers = &world.round.modifiers;
    let artillery = modifiers.crown_artillery && !modifiers.artillery_used.contains(&player);
    (units + u32::from(artillery), artillery)
}

/// Resolve an attack with the given rolls
///
/// A 1 loses a unit. A 2 to 5 pushes the track back and loses a unit.
/// A 6 pushes the track back for free. Every roll earns one honor, two
/// against the Tatars after Vienna.
pub fn resolve_attack(
    world: &mut WorldState,
    player: PlayerId,
    track: RaidTrackId,
    province: ProvinceId,
    rolls: Vec<Roll>,
    artillery: bool,
) -> AttackResult {
    let honor_per_roll = if track == RaidTrackId::Tatarzy && world.round.modifiers.extra_honor_vs_tatars {
        2
    } else {
        1
    };

    let mut track_reduced = 0;
    let mut units_lost = 0;
    let mut honor_gained = 0;
    for &roll in &rolls {
        let (hits, loses_unit) = match roll {
            1 => (false, true),
            2..=5 => (true, true),
            _ => (true, false),
        };
        if hits && world.track(track).value > 0 {
            world.track_mut(track).reduce(1);
            track_reduced += 1;
        }
        if loses_unit {
            units_lost += world.troops.remove(province, player, 1);
        }
        honor_gained += honor_per_roll;
    }

    if artillery {
        world.round.modifiers.artillery_used.push(player);
    }
    world.player_mut(player).honor += honor_gained;

    AttackResult {
        player,
        track,
        province,
        rolls,
        track_reduced,
        units_lost,
        honor_gained,
        track_now: world.track(track).value,
        artillery,
    }
}

/// Validate, roll with the world rng and resolve
pub fn attack_invaders(
    world: &mut WorldState,
    player: PlayerId,
    track: RaidTrackId,
    province: ProvinceId,
) -> Result<AttackResult> {
    validate_attack(world, player, track, province)?;
    let (dice, artillery) = attack_dice(world, player, province);
    let rolls = roll_many(&mut world.rng, dice);
    let result = resolve_attack(world, player, track, province, rolls, artillery);
    info!(
        player = %world.name(player),
        track = %track,
        province = %province,
        reduced = result.track_reduced,
        lost = result.units_lost,
        honor = result.honor_gained,
        "invaders attacked"
    );
    Ok(result)
}

/// Every (track, province) pair the player could attack right now
pub fn attack_options(world: &WorldState, player: PlayerId) -> Vec<(RaidTrackId, ProvinceId)> {
    RaidTrackId::ALL
        .into_iter()
        .flat_map(|track| track.attack_sources().into_iter().map(move |p| (track, p)))
        .filter(|&(track, province)| validate_attack(world, player, track, province).is_ok())
        .collect()
}

pub fn eligible_attack_exists(world: &WorldState, player: PlayerId) -> bool {
    !attack_options(world, player).is_empty()
}

/// What an invader destroyed in a province
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ruin {
    Fort,
    Estate(PlayerId),
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Devastation {
    pub track: RaidTrackId,
    pub roll: Roll,
    pub province: ProvinceId,
    pub ruin: Ruin,
    pub wealth_now: u8,
}

/// Die 1-3 hits the first threatened province, 4-6 the second
pub fn devastation_target(track: RaidTrackId, roll: Roll) -> ProvinceId {
    let [first, second] = track.threatened();
    if roll <= 3 {
        first
    } else {
        second
    }
}

/// Devastate one province for a threatening track and reset the track
pub fn devastate_with_roll(world: &mut WorldState, track: RaidTrackId, roll: Roll) -> Devastation {
    let province = devastation_target(track, roll);
    let prov = world.province_mut(province);
    let ruin = if prov.has_fort {
        prov.has_fort = false;
        Ruin::Fort
    } else {
        match prov.destroy_last_estate() {
            Some(owner) => Ruin::Estate(owner),
            None => Ruin::Nothing,
        }
    };
    prov.impoverish();
    let wealth_now = prov.wealth;
    world.track_mut(track).value = POST_DEVASTATION_VALUE;

    Devastation { track, roll, province, ruin, wealth_now }
}

/// Every track at the threshold devastates, in fixed track order
pub fn devastate<R: Rng + ?Sized>(world: &mut WorldState, rng: &mut R) -> Vec<Devastation> {
    let mut out = Vec::new();
    for track in RaidTrackId::ALL {
        if !world.track(track).is_threatening() {
            continue;
        }
        let roll = roll_d6(rng);
        let d = devastate_with_roll(world, track, roll);
        info!(track = %track, province = %d.province, ruin = ?d.ruin, "devastation");
        out.push(d);
    }
    out
}

pub fn run_devastation(world: &mut WorldState) -> Vec<Devastation> {
    let mut rng = world.rng.clone();
    let out = devastate(world, &mut rng);
    world.rng = rng;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn with_troops(province: ProvinceId, units: u32) -> WorldState {
        let mut world = WorldState::for_test(2);
        world.troops.set(province, PlayerId(0), units);
        world
    }

    #[test]
    fn test_reinforcement_table() {
        let deltas: Vec<u32> = (1..=6).map(reinforcement_delta).collect();
        assert_eq!(deltas, vec![0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn test_reinforce_raises_every_track() {
        let mut world = WorldState::for_test(2);
        let report = reinforce_tracks(&mut world);
        assert_eq!(report.len(), 3);
        for r in &report {
            assert_eq!(world.track(r.track).value, r.delta);
        }
    }

    #[test]
    fn test_attack_requires_source_troops_and_threat() {
        let mut world = with_troops(ProvinceId::Prusy, 2);
        world.track_mut(RaidTrackId::Szwecja).value = 2;
        assert!(validate_attack(&world, PlayerId(0), RaidTrackId::Szwecja, ProvinceId::Prusy).is_ok());
        assert!(validate_attack(&world, PlayerId(0), RaidTrackId::Tatarzy, ProvinceId::Prusy).is_err());
        assert!(validate_attack(&world, PlayerId(1), RaidTrackId::Szwecja, ProvinceId::Prusy).is_err());
        world.track_mut(RaidTrackId::Szwecja).value = 0;
        assert!(validate_attack(&world, PlayerId(0), RaidTrackId::Szwecja, ProvinceId::Prusy).is_err());
    }

    #[test]
    fn test_roll_outcomes() {
        let mut world = with_troops(ProvinceId::Litwa, 3);
        world.track_mut(RaidTrackId::Moskwa).value = 5;
        let r = resolve_attack(&mut world, PlayerId(0), RaidTrackId::Moskwa, ProvinceId::Litwa, vec![1, 4, 6], false);
        assert_eq!(r.track_reduced, 2);
        assert_eq!(r.units_lost, 2);
        assert_eq!(r.honor_gained, 3);
        assert_eq!(world.track(RaidTrackId::Moskwa).value, 3);
        assert_eq!(world.troops.get(ProvinceId::Litwa, PlayerId(0)), 1);
        assert_eq!(world.players[0].honor, 3);
    }

    #[test]
    fn test_rolls_continue_after_track_cleared() {
        let mut world = with_troops(ProvinceId::Ukraina, 3);
        world.track_mut(RaidTrackId::Tatarzy).value = 1;
        let r = resolve_attack(&mut world, PlayerId(0), RaidTrackId::Tatarzy, ProvinceId::Ukraina, vec![6, 3, 2], false);
        assert_eq!(r.track_reduced, 1);
        assert_eq!(r.track_now, 0);
        assert_eq!(r.units_lost, 2);
        assert_eq!(r.honor_gained, 3);
    }

    #[test]
    fn test_vienna_doubles_honor_against_tatars() {
        let mut world = with_troops(ProvinceId::Malopolska, 1);
        world.round.modifiers.extra_honor_vs_tatars = true;
        world.track_mut(RaidTrackId::Tatarzy).value = 2;
        let r = resolve_attack(&mut world, PlayerId(0), RaidTrackId::Tatarzy, ProvinceId::Malopolska, vec![6], false);
        assert_eq!(r.honor_gained, 2);
    }

    #[test]
    fn test_artillery_adds_one_die_once() {
        let mut world = with_troops(ProvinceId::Prusy, 2);
        world.round.modifiers.crown_artillery = true;
        world.track_mut(RaidTrackId::Szwecja).value = 9;
        assert_eq!(attack_dice(&world, PlayerId(0), ProvinceId::Prusy), (3, true));
        let r = attack_invaders(&mut world, PlayerId(0), RaidTrackId::Szwecja, ProvinceId::Prusy).unwrap();
        assert_eq!(r.rolls.len(), 3);
        world.troops.set(ProvinceId::Prusy, PlayerId(0), 2);
        assert_eq!(attack_dice(&world, PlayerId(0), ProvinceId::Prusy), (2, false));
    }

    #[test]
    fn test_no_options_without_troops() {
        let mut world = WorldState::for_test(2);
        world.track_mut(RaidTrackId::Szwecja).value = 4;
        assert!(!eligible_attack_exists(&world, PlayerId(0)));
        world.troops.set(ProvinceId::Litwa, PlayerId(0), 1);
        world.track_mut(RaidTrackId::Moskwa).value = 1;
        assert_eq!(
            attack_options(&world, PlayerId(0)),
            vec![(RaidTrackId::Szwecja, ProvinceId::Litwa), (RaidTrackId::Moskwa, ProvinceId::Litwa)]
        );
    }

    #[test]
    fn test_devastation_prefers_fort() {
        let mut world = WorldState::for_test(2);
        let p = ProvinceId::Prusy;
        world.province_mut(p).has_fort = true;
        world.province_mut(p).build_estate(PlayerId(1));
        world.track_mut(RaidTrackId::Szwecja).value = 4;
        let d = devastate_with_roll(&mut world, RaidTrackId::Szwecja, 2);
        assert_eq!(d.province, p);
        assert_eq!(d.ruin, Ruin::Fort);
        assert_eq!(world.province(p).estates_of(PlayerId(1)), 1);
        assert_eq!(world.province(p).wealth, 1);
        assert_eq!(world.track(RaidTrackId::Szwecja).value, 1);
    }

    #[test]
    fn test_devastation_takes_back_most_estate() {
        let mut world = WorldState::for_test(2);
        let p = ProvinceId::Malopolska;
        world.province_mut(p).build_estate(PlayerId(0));
        world.province_mut(p).build_estate(PlayerId(1));
        let d = devastate_with_roll(&mut world, RaidTrackId::Tatarzy, 5);
        assert_eq!(d.ruin, Ruin::Estate(PlayerId(1)));
        assert_eq!(world.province(p).estates_of(PlayerId(0)), 1);
    }

    #[test]
    fn test_quiet_tracks_do_not_devastate() {
        let mut world = WorldState::for_test(2);
        world.track_mut(RaidTrackId::Moskwa).value = 2;
        assert!(run_devastation(&mut world).is_empty());
        assert_eq!(world.track(RaidTrackId::Moskwa).value, 2);
    }

    proptest! {
        #[test]
        fn prop_devastation_resets_to_one(value in 3u32..50, roll in 1u8..=6) {
            let mut world = WorldState::for_test(2);
            world.track_mut(RaidTrackId::Moskwa).value = value;
            devastate_with_roll(&mut world, RaidTrackId::Moskwa, roll);
            prop_assert_eq!(world.track(RaidTrackId::Moskwa).value, 1);
        }

        #[test]
        fn prop_attack_never_overdraws(units in 0u32..6, track in 0u32..4, rolls in proptest::collection::vec(1u8..=6, 0..8)) {
            let mut world = with_troops(ProvinceId::Litwa, units);
            world.track_mut(RaidTrackId::Szwecja).value = track;
            let r = resolve_attack(&mut world, PlayerId(0), RaidTrackId::Szwecja, ProvinceId::Litwa, rolls, false);
            prop_assert!(r.units_lost <= units);
            prop_assert!(r.track_reduced <= track);
            prop_assert_eq!(world.troops.get(ProvinceId::Litwa, PlayerId(0)), units - r.units_lost);
        }
    }
}

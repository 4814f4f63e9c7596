//! The round event deck
//!
//! Every round opens with one of 25 historical events. Most only set a
//! round modifier that later phases read. A few act on the board at once.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::error::{Result, SejmError};
use crate::core::types::{PlayerId, ProvinceId, RaidTrackId};
use crate::systems::influence::sole_controller;
use crate::world::{WorldState, MAX_WEALTH};

pub const EVENT_COUNT: u8 = 25;

/// Gold demanded by the revolts and the Poznań fire
pub const UPRISING_FINE: u32 = 2;

const NAMES: [&str; EVENT_COUNT as usize] = [
    "Liberum veto",
    "Elekcja viritim",
    "Empty treasury",
    "Treasury reform",
    "The Deluge",
    "Northern war",
    "Khmelnytsky uprising",
    "Cossacks in service",
    "War with Muscovy",
    "Battle of Vienna",
    "Peace of Oliva",
    "Levy en masse",
    "Border fortification",
    "Crown artillery",
    "Famine",
    "Drought",
    "Good harvest",
    "Royal fairs",
    "Peasant revolt",
    "Magnate intrigue",
    "Poznań revolt",
    "Środa sejmik",
    "Poznań fire",
    "Warta-Odra route",
    "Sea tolls",
];

pub fn event_name(number: u8) -> Option<&'static str> {
    number
        .checked_sub(1)
        .and_then(|i| NAMES.get(usize::from(i)))
        .copied()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOutcome {
    pub number: u8,
    pub name: String,
    /// What happened, one line each
    pub details: Vec<String>,
}

pub fn draw_event<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=EVENT_COUNT)
}

/// Apply event `number` (1..=25) to the world
pub fn apply_event(world: &mut WorldState, number: u8) -> Result<EventOutcome> {
    let name = event_name(number)
        .ok_or_else(|| SejmError::parse(format!("event must be 1..{}, got {}", EVENT_COUNT, number)))?;
    let mut details = Vec::new();
    let m = &mut world.round.modifiers;

    match number {
        1 => {
            m.sejm_cancelled = true;
            details.push("The sejm is broken up: no auction and no law this round.".to_string());
        }
        2 => details.push("The nobility gathers to elect the king.".to_string()),
        3 => {
            m.admin_yield = 0;
            details.push("Administer yields no gold this round.".to_string());
        }
        4 => {
            m.admin_yield = 3;
            details.push("Administer yields 3 gold this round.".to_string());
        }
        5 => details.push(raise(world, RaidTrackId::Szwecja, 2)),
        6 => {
            m.prusy_estate_penalty = 1;
            details.push(raise(world, RaidTrackId::Szwecja, 1));
            details.push("Estates in Prusy pay 1 less this round.".to_string());
        }
        7 => {
            details.push(raise(world, RaidTrackId::Moskwa, 1));
            details.push(raise(world, RaidTrackId::Tatarzy, 1));
        }
        8 => details.push(cossacks(world)),
        9 => {
            m.litwa_discount = 1;
            details.push(raise(world, RaidTrackId::Moskwa, 2));
            details.push("Influence and estates in Litwa cost 1 less this round.".to_string());
        }
        10 => {
            m.extra_honor_vs_tatars = true;
            details.push(lower(world, RaidTrackId::Tatarzy, 1));
            details.push("Attacks on the Tatars earn extra honor this round.".to_string());
        }
        11 => details.push(lower(world, RaidTrackId::Szwecja, 1)),
        12 => {
            m.recruit_cost = Some(1);
            details.push("Recruiting costs 1 gold this round.".to_string());
        }
        13 => details.push(border_fort(world)),
        14 => {
            m.crown_artillery = true;
            m.artillery_used.clear();
            details.push("Each player's first attack on invaders rolls one extra die.".to_string());
        }
        15 => details.push(famine(world)),
        16 => {
            m.enrich_cost = Some(3);
            details.push("Enriching costs 3 gold this round.".to_string());
        }
        17 => {
            m.enrich_cost = Some(1);
            details.push("Enriching costs 1 gold this round.".to_string());
        }
        18 => {
            m.royal_fairs = true;
            details.push("Everyone gains 1 extra gold at income.".to_string());
        }
        19 => details.extend(peasant_revolt(world)),
        20 => details.push(magnate_intrigue(world)),
        21 => details.push(fine_wielkopolska(world)),
        22 => {
            m.wielkopolska_tiebreak = true;
            details.push("Auction ties go to the controller of Wielkopolska.".to_string());
        }
        23 => {
            world.province_mut(ProvinceId::Wielkopolska).impoverish();
            details.push(format!(
                "Wielkopolska wealth drops to {}.",
                world.province(ProvinceId::Wielkopolska).wealth
            ));
            details.push(fine_wielkopolska(world));
        }
        24 => {
            m.wielkopolska_influence_cost = Some(1);
            m.wielkopolska_estate_cost = Some(3);
            details.push("In Wielkopolska influence costs 1 and estates cost 3 this round.".to_string());
        }
        _ => details.push(sea_tolls(world)),
    }

    info!(event = number, name, "event applied");
    Ok(EventOutcome { number, name: name.to_string(), details })
}

fn raise(world: &mut WorldState, track: RaidTrackId, by: u32) -> String {
    let t = world.track_mut(track);
    t.raise(by);
    format!("{} +{} (now {}).", track, by, t.value)
}

fn lower(world: &mut WorldState, track: RaidTrackId, by: u32) -> String {
    let t = world.track_mut(track);
    t.reduce(by);
    format!("{} -{} (now {}).", track, by, t.value)
}

fn cossacks(world: &mut WorldState) -> String {
    let holders = world.troops.holders(ProvinceId::Ukraina);
    if holders.is_empty() {
        return "Nobody has troops in Ukraina.".to_string();
    }
    for &p in &holders {
        world.troops.add(ProvinceId::Ukraina, p, 1);
    }
    let names: Vec<&str> = holders.iter().map(|&p| world.name(p)).collect();
    format!("One more troop in Ukraina for {}.", names.join(", "))
}

fn border_fort(world: &mut WorldState) -> String {
    let unfortified: Vec<ProvinceId> = ProvinceId::BORDER
        .into_iter()
        .filter(|&p| !world.province(p).has_fort)
        .collect();
    let pool: &[ProvinceId] = if unfortified.is_empty() { &ProvinceId::BORDER } else { &unfortified };
    match pool.choose(&mut world.rng).copied() {
        Some(p) => {
            world.province_mut(p).has_fort = true;
            format!("A fort rises in {}.", p)
        }
        None => "No border province to fortify.".to_string(),
    }
}

fn famine(world: &mut WorldState) -> String {
    let mut hit = Vec::new();
    for prov in &mut world.provinces {
        if prov.wealth >= MAX_WEALTH {
            prov.wealth = MAX_WEALTH - 1;
            hit.push(prov.id.name());
        }
    }
    if hit.is_empty() {
        "No province was rich enough to suffer.".to_string()
    } else {
        format!("Wealth drops from 3 to 2 in {}.", hit.join(", "))
    }
}

/// Poor provinces rise against their sole controller
fn peasant_revolt(world: &mut WorldState) -> Vec<String> {
    let mut lines = Vec::new();
    for province in ProvinceId::ALL {
        if world.province(province).wealth > 1 {
            continue;
        }
        let Some(ctrl) = sole_controller(world, province) else {
            continue;
        };
        if world.player_mut(ctrl).try_spend(UPRISING_FINE) {
            lines.push(format!("{}: {} pays {} gold.", province, world.name(ctrl), UPRISING_FINE));
        } else {
            world.nobles.remove(province, ctrl, 1);
            lines.push(format!("{}: {} cannot pay and loses a noble.", province, world.name(ctrl)));
        }
    }
    if lines.is_empty() {
        lines.push("The peasants stay quiet.".to_string());
    }
    lines
}

/// One random noble of a player without the majority leaves a random province
fn magnate_intrigue(world: &mut WorldState) -> String {
    let majority = world.majority_holder();
    let candidates: Vec<(ProvinceId, Vec<PlayerId>)> = ProvinceId::ALL
        .into_iter()
        .filter_map(|province| {
            let present: Vec<PlayerId> = world
                .player_ids()
                .filter(|&p| world.has_noble(province, p) && Some(p) != majority)
                .collect();
            (!present.is_empty()).then_some((province, present))
        })
        .collect();

    let Some((province, present)) = candidates.choose(&mut world.rng).cloned() else {
        return "No noble to remove.".to_string();
    };
    let Some(victim) = present.choose(&mut world.rng).copied() else {
        return "No noble to remove.".to_string();
    };
    world.nobles.remove(province, victim, 1);
    format!("{} loses a noble in {}.", world.name(victim), province)
}

fn fine_wielkopolska(world: &mut WorldState) -> String {
    let province = ProvinceId::Wielkopolska;
    let Some(ctrl) = sole_controller(world, province) else {
        return "Nobody controls Wielkopolska.".to_string();
    };
    if world.player_mut(ctrl).try_spend(UPRISING_FINE) {
        format!("{} pays {} gold.", world.name(ctrl), UPRISING_FINE)
    } else if world.province_mut(province).remove_last_estate_of(ctrl) {
        format!("{} cannot pay and loses an estate.", world.name(ctrl))
    } else {
        format!("{} cannot pay but has no estate to lose.", world.name(ctrl))
    }
}

fn sea_tolls(world: &mut WorldState) -> String {
    match sole_controller(world, ProvinceId::Prusy) {
        Some(ctrl) => {
            world.player_mut(ctrl).gold += 2;
            format!("{} collects 2 gold in tolls.", world.name(ctrl))
        }
        None => "Nobody controls Prusy.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_unknown_event_rejected() {
        let mut world = WorldState::for_test(2);
        assert!(apply_event(&mut world, 0).is_err());
        assert!(apply_event(&mut world, 26).is_err());
    }

    #[test]
    fn test_draw_stays_in_deck() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let n = draw_event(&mut rng);
            assert!((1..=EVENT_COUNT).contains(&n));
        }
    }

    #[test]
    fn test_every_event_applies() {
        for n in 1..=EVENT_COUNT {
            let mut world = WorldState::for_test(3);
            let outcome = apply_event(&mut world, n).unwrap();
            assert_eq!(outcome.number, n);
            assert!(!outcome.details.is_empty());
        }
    }

    #[test]
    fn test_modifier_events() {
        let mut world = WorldState::for_test(2);
        apply_event(&mut world, 1).unwrap();
        assert!(world.round.modifiers.sejm_cancelled);
        apply_event(&mut world, 3).unwrap();
        assert_eq!(world.round.modifiers.admin_yield, 0);
        apply_event(&mut world, 12).unwrap();
        assert_eq!(world.round.modifiers.recruit_cost, Some(1));
        apply_event(&mut world, 24).unwrap();
        assert_eq!(world.round.modifiers.wielkopolska_estate_cost, Some(3));
    }

    #[test]
    fn test_track_events() {
        let mut world = WorldState::for_test(2);
        apply_event(&mut world, 5).unwrap();
        apply_event(&mut world, 7).unwrap();
        assert_eq!(world.track(RaidTrackId::Szwecja).value, 2);
        assert_eq!(world.track(RaidTrackId::Moskwa).value, 1);
        apply_event(&mut world, 10).unwrap();
        assert_eq!(world.track(RaidTrackId::Tatarzy).value, 0);
        apply_event(&mut world, 10).unwrap();
        assert_eq!(world.track(RaidTrackId::Tatarzy).value, 0);
    }

    #[test]
    fn test_cossacks_reinforce_ukraina() {
        let mut world = WorldState::for_test(3);
        world.troops.set(ProvinceId::Ukraina, PlayerId(1), 2);
        apply_event(&mut world, 8).unwrap();
        assert_eq!(world.troops.get(ProvinceId::Ukraina, PlayerId(1)), 3);
        assert_eq!(world.troops.get(ProvinceId::Ukraina, PlayerId(0)), 0);
    }

    #[test]
    fn test_border_fort_lands_on_border() {
        let mut world = WorldState::for_test(2);
        apply_event(&mut world, 13).unwrap();
        let forts: Vec<ProvinceId> = ProvinceId::ALL
            .into_iter()
            .filter(|&p| world.province(p).has_fort)
            .collect();
        assert_eq!(forts.len(), 1);
        assert!(ProvinceId::BORDER.contains(&forts[0]));
    }

    #[test]
    fn test_famine_lowers_rich_provinces() {
        let mut world = WorldState::for_test(2);
        world.province_mut(ProvinceId::Litwa).wealth = 3;
        apply_event(&mut world, 15).unwrap();
        assert_eq!(world.province(ProvinceId::Litwa).wealth, 2);
        assert_eq!(world.province(ProvinceId::Prusy).wealth, 2);
    }

    #[test]
    fn test_peasant_revolt_fines_or_removes_noble() {
        let mut world = WorldState::for_test(2);
        world.province_mut(ProvinceId::Litwa).wealth = 1;
        world.province_mut(ProvinceId::Prusy).wealth = 0;
        world.nobles.set(ProvinceId::Litwa, PlayerId(0), 2);
        world.nobles.set(ProvinceId::Prusy, PlayerId(1), 1);
        world.players[1].gold = 1;
        apply_event(&mut world, 19).unwrap();
        assert_eq!(world.players[0].gold, 4);
        assert_eq!(world.nobles.get(ProvinceId::Prusy, PlayerId(1)), 0);
        assert_eq!(world.players[1].gold, 1);
    }

    #[test]
    fn test_intrigue_spares_majority_holder() {
        let mut world = WorldState::for_test(2);
        world.players[0].majority = true;
        world.nobles.set(ProvinceId::Litwa, PlayerId(0), 2);
        world.nobles.set(ProvinceId::Prusy, PlayerId(1), 1);
        apply_event(&mut world, 20).unwrap();
        assert_eq!(world.nobles.get(ProvinceId::Litwa, PlayerId(0)), 2);
        assert_eq!(world.nobles.get(ProvinceId::Prusy, PlayerId(1)), 0);
    }

    #[test]
    fn test_poznan_revolt_takes_estate_when_broke() {
        let mut world = WorldState::for_test(2);
        let p = ProvinceId::Wielkopolska;
        world.nobles.set(p, PlayerId(0), 1);
        world.province_mut(p).build_estate(PlayerId(0));
        world.players[0].gold = 1;
        apply_event(&mut world, 21).unwrap();
        assert_eq!(world.province(p).estates_of(PlayerId(0)), 0);
        assert_eq!(world.players[0].gold, 1);
    }

    #[test]
    fn test_poznan_fire_burns_wealth_and_fines() {
        let mut world = WorldState::for_test(2);
        world.nobles.set(ProvinceId::Wielkopolska, PlayerId(1), 1);
        apply_event(&mut world, 23).unwrap();
        assert_eq!(world.province(ProvinceId::Wielkopolska).wealth, 1);
        assert_eq!(world.players[1].gold, 4);
    }

    #[test]
    fn test_sea_tolls_pay_prusy_controller() {
        let mut world = WorldState::for_test(2);
        world.nobles.set(ProvinceId::Prusy, PlayerId(1), 1);
        apply_event(&mut world, 25).unwrap();
        assert_eq!(world.players[1].gold, 8);
        assert_eq!(world.players[0].gold, 6);
    }
}

//! Province control
//!
//! A province belongs to whoever has the most nobles there. A tie is broken
//! in favour of the only tied player with troops present; any other tie
//! leaves control shared (and, for most purposes, worthless).

use crate::core::types::{PlayerId, ProvinceId};
use crate::world::WorldState;

/// Players controlling `province`, in seating order. Empty if no nobles.
pub fn controllers(world: &WorldState, province: ProvinceId) -> Vec<PlayerId> {
    let nobles = world.nobles.in_province(province);
    let max = nobles.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }

    let leaders: Vec<PlayerId> = nobles
        .iter()
        .enumerate()
        .filter(|(_, &n)| n == max)
        .map(|(i, _)| PlayerId(i))
        .collect();
    if leaders.len() == 1 {
        return leaders;
    }

    let with_troops: Vec<PlayerId> = leaders
        .iter()
        .copied()
        .filter(|&p| world.troops.get(province, p) > 0)
        .collect();
    if with_troops.len() == 1 {
        return with_troops;
    }

    leaders
}

/// The single unambiguous controller, if any
pub fn sole_controller(world: &WorldState, province: ProvinceId) -> Option<PlayerId> {
    match controllers(world, province).as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

/// Provinces the player controls alone, in map order
pub fn solely_controlled_by(world: &WorldState, player: PlayerId) -> Vec<ProvinceId> {
    ProvinceId::ALL
        .into_iter()
        .filter(|&p| sole_controller(world, p) == Some(player))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(world: &mut WorldState, province: ProvinceId, nobles: &[u32], troops: &[u32]) {
        for (i, (&n, &t)) in nobles.iter().zip(troops).enumerate() {
            world.nobles.set(province, PlayerId(i), n);
            world.troops.set(province, PlayerId(i), t);
        }
    }

    #[test]
    fn test_nobody_controls_empty_province() {
        let world = WorldState::for_test(3);
        assert!(controllers(&world, ProvinceId::Litwa).is_empty());
        assert_eq!(sole_controller(&world, ProvinceId::Litwa), None);
    }

    #[test]
    fn test_most_nobles_wins() {
        let mut world = WorldState::for_test(3);
        set(&mut world, ProvinceId::Prusy, &[1, 3, 2], &[0, 0, 5]);
        assert_eq!(controllers(&world, ProvinceId::Prusy), vec![PlayerId(1)]);
    }

    #[test]
    fn test_tie_broken_by_troop_presence() {
        let mut world = WorldState::for_test(3);
        set(&mut world, ProvinceId::Ukraina, &[2, 2, 0], &[0, 3, 0]);
        assert_eq!(sole_controller(&world, ProvinceId::Ukraina), Some(PlayerId(1)));
    }

    #[test]
    fn test_tie_with_troops_on_both_sides_stays_shared() {
        let mut world = WorldState::for_test(3);
        set(&mut world, ProvinceId::Ukraina, &[2, 2, 0], &[1, 3, 0]);
        assert_eq!(controllers(&world, ProvinceId::Ukraina), vec![PlayerId(0), PlayerId(1)]);
        assert_eq!(sole_controller(&world, ProvinceId::Ukraina), None);
    }

    #[test]
    fn test_troops_of_non_leader_do_not_break_tie() {
        let mut world = WorldState::for_test(3);
        set(&mut world, ProvinceId::Litwa, &[2, 2, 1], &[0, 0, 4]);
        assert_eq!(controllers(&world, ProvinceId::Litwa).len(), 2);
    }

    #[test]
    fn test_solely_controlled_by() {
        let mut world = WorldState::for_test(2);
        set(&mut world, ProvinceId::Prusy, &[1, 0], &[0, 0]);
        set(&mut world, ProvinceId::Malopolska, &[2, 1], &[0, 0]);
        set(&mut world, ProvinceId::Litwa, &[1, 1], &[0, 0]);
        assert_eq!(
            solely_controlled_by(&world, PlayerId(0)),
            vec![ProvinceId::Prusy, ProvinceId::Malopolska]
        );
    }
}

//! WorldState - the aggregate root every phase mutates

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::types::{PlayerId, ProvinceId, RaidTrackId};
use crate::world::board::UnitBoard;
use crate::world::player::Player;
use crate::world::province::Province;
use crate::world::raid::RaidTrack;
use crate::world::round::RoundStatus;

/// The whole mutable game
pub struct WorldState {
    pub players: Vec<Player>,
    /// Indexed by `ProvinceId::index()`
    pub provinces: Vec<Province>,
    /// Indexed by `RaidTrackId::index()`
    pub raid_tracks: Vec<RaidTrack>,
    pub troops: UnitBoard,
    pub nobles: UnitBoard,
    pub round: RoundStatus,
    /// Random number generator (deterministic)
    pub rng: ChaCha8Rng,
    pub config: GameConfig,
}

impl WorldState {
    pub fn new(names: &[String], config: GameConfig) -> Result<Self> {
        config.validate()?;
        config.validate_players(names)?;

        let players = names
            .iter()
            .map(|name| Player::new(name.trim(), config.starting_gold))
            .collect::<Vec<_>>();
        let provinces = ProvinceId::ALL
            .into_iter()
            .map(|id| Province::new(id, config.starting_wealth))
            .collect();
        let raid_tracks = RaidTrackId::ALL.into_iter().map(RaidTrack::new).collect();

        Ok(Self {
            troops: UnitBoard::new(players.len()),
            nobles: UnitBoard::new(players.len()),
            players,
            provinces,
            raid_tracks,
            round: RoundStatus::new(config.rounds),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
        })
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.players.len()).map(PlayerId)
    }

    /// Panics on an index outside the roster; ids only come from this world
    pub fn player(&self, id: PlayerId) -> &Player {
        assert!(id.index() < self.players.len(), "player {} out of range", id);
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        assert!(id.index() < self.players.len(), "player {} out of range", id);
        &mut self.players[id.index()]
    }

    pub fn name(&self, id: PlayerId) -> &str {
        &self.player(id).name
    }

    pub fn province(&self, id: ProvinceId) -> &Province {
        &self.provinces[id.index()]
    }

    pub fn province_mut(&mut self, id: ProvinceId) -> &mut Province {
        &mut self.provinces[id.index()]
    }

    pub fn track(&self, id: RaidTrackId) -> &RaidTrack {
        &self.raid_tracks[id.index()]
    }

    pub fn track_mut(&mut self, id: RaidTrackId) -> &mut RaidTrack {
        &mut self.raid_tracks[id.index()]
    }

    pub fn marshal(&self) -> PlayerId {
        self.round.marshal
    }

    /// Every player, starting with the marshal and wrapping around
    pub fn turn_order(&self) -> Vec<PlayerId> {
        let n = self.players.len();
        let start = self.round.marshal.index();
        (0..n).map(|k| PlayerId((start + k) % n)).collect()
    }

    pub fn majority_holder(&self) -> Option<PlayerId> {
        self.players.iter().position(|p| p.majority).map(PlayerId)
    }

    pub fn has_noble(&self, province: ProvinceId, player: PlayerId) -> bool {
        self.nobles.get(province, player) > 0
    }

    /// Estates owned by a player across the whole map
    pub fn estates_of(&self, player: PlayerId) -> usize {
        self.provinces.iter().map(|p| p.estates_of(player)).sum()
    }

    /// Clear per-round player flags and rule overrides
    pub fn begin_round(&mut self) {
        for p in &mut self.players {
            p.reset_for_round();
        }
        self.round.reset_for_round();
    }

    /// Players named P0, P1, ... with the default config
    #[cfg(test)]
    pub(crate) fn for_test(player_count: usize) -> Self {
        let names: Vec<String> = (0..player_count).map(|i| format!("P{}", i)).collect();
        Self::new(&names, GameConfig::default()).expect("test roster is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("P{}", i)).collect()
    }

    #[test]
    fn test_new_world_starts_empty() {
        let world = WorldState::new(&names(3), GameConfig::default()).unwrap();
        assert_eq!(world.player_count(), 3);
        assert!(world.players.iter().all(|p| p.gold == 6));
        assert_eq!(world.provinces.len(), 5);
        assert!(world.raid_tracks.iter().all(|t| t.value == 0));
        assert!(world.troops.is_empty());
        assert!(world.nobles.is_empty());
        assert_eq!(world.round.current_round, 1);
    }

    #[test]
    fn test_turn_order_starts_with_marshal() {
        let mut world = WorldState::new(&names(3), GameConfig::default()).unwrap();
        world.round.marshal = PlayerId(2);
        assert_eq!(world.turn_order(), vec![PlayerId(2), PlayerId(0), PlayerId(1)]);
    }

    #[test]
    fn test_empty_roster_rejected() {
        assert!(WorldState::new(&[], GameConfig::default()).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_player_panics() {
        let world = WorldState::new(&names(2), GameConfig::default()).unwrap();
        let _ = world.player(PlayerId(5));
    }
}

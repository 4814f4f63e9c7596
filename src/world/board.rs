//! Per-province, per-player unit counts (troops and nobles)

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, ProvinceId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitBoard {
    /// Indexed by province, then player
    counts: Vec<Vec<u32>>,
}

impl UnitBoard {
    pub fn new(player_count: usize) -> Self {
        Self {
            counts: vec![vec![0; player_count]; ProvinceId::ALL.len()],
        }
    }

    pub fn get(&self, province: ProvinceId, player: PlayerId) -> u32 {
        self.counts[province.index()][player.index()]
    }

    pub fn set(&mut self, province: ProvinceId, player: PlayerId, value: u32) {
        self.counts[province.index()][player.index()] = value;
    }

    pub fn add(&mut self, province: ProvinceId, player: PlayerId, amount: u32) {
        let cell = &mut self.counts[province.index()][player.index()];
        *cell = cell.saturating_add(amount);
    }

    /// Remove up to `amount` units, returning how many were actually removed
    pub fn remove(&mut self, province: ProvinceId, player: PlayerId, amount: u32) -> u32 {
        let cell = &mut self.counts[province.index()][player.index()];
        let removed = amount.min(*cell);
        *cell -= removed;
        removed
    }

    /// Counts for every player on one province
    pub fn in_province(&self, province: ProvinceId) -> &[u32] {
        &self.counts[province.index()]
    }

    /// Players with at least one unit on the province, in seating order
    pub fn holders(&self, province: ProvinceId) -> Vec<PlayerId> {
        self.in_province(province)
            .iter()
            .enumerate()
            .filter(|(_, &n)| n > 0)
            .map(|(i, _)| PlayerId(i))
            .collect()
    }

    pub fn total_for(&self, player: PlayerId) -> u32 {
        self.counts.iter().map(|row| row[player.index()]).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|row| row.iter().all(|&n| n == 0))
    }
}

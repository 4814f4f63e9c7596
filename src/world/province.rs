//! Provinces and their estate slots

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, ProvinceId};

/// Estate slots per province
pub const ESTATE_SLOTS: usize = 5;

/// Highest wealth a province can reach
pub const MAX_WEALTH: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub id: ProvinceId,
    pub has_fort: bool,
    /// 0..=MAX_WEALTH
    pub wealth: u8,
    /// Filled front to back, emptied from the back
    estates: [Option<PlayerId>; ESTATE_SLOTS],
}

impl Province {
    pub fn new(id: ProvinceId, wealth: u8) -> Self {
        Self {
            id,
            has_fort: false,
            wealth: wealth.min(MAX_WEALTH),
            estates: [None; ESTATE_SLOTS],
        }
    }

    pub fn estates(&self) -> &[Option<PlayerId>; ESTATE_SLOTS] {
        &self.estates
    }

    /// Owners of occupied slots, front to back
    pub fn estate_owners(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.estates.iter().flatten().copied()
    }

    pub fn estates_of(&self, player: PlayerId) -> usize {
        self.estate_owners().filter(|&o| o == player).count()
    }

    pub fn free_slots(&self) -> usize {
        self.estates.iter().filter(|s| s.is_none()).count()
    }

    /// Place an estate in the first empty slot. False when full.
    pub fn build_estate(&mut self, owner: PlayerId) -> bool {
        match self.estates.iter_mut().find(|s| s.is_none()) {
            Some(slot) => {
                *slot = Some(owner);
                true
            }
            None => false,
        }
    }

    /// Remove the back-most estate regardless of owner
    pub fn destroy_last_estate(&mut self) -> Option<PlayerId> {
        self.estates.iter_mut().rev().find(|s| s.is_some()).and_then(Option::take)
    }

    /// Remove the back-most estate owned by `owner`
    pub fn remove_last_estate_of(&mut self, owner: PlayerId) -> bool {
        match self.estates.iter_mut().rev().find(|s| **s == Some(owner)) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    /// Raise wealth by one. False if already at the cap.
    pub fn enrich(&mut self) -> bool {
        if self.wealth >= MAX_WEALTH {
            return false;
        }
        self.wealth += 1;
        true
    }

    pub fn impoverish(&mut self) {
        self.wealth = self.wealth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estates_fill_front_to_back() {
        let mut p = Province::new(ProvinceId::Litwa, 2);
        assert!(p.build_estate(PlayerId(0)));
        assert!(p.build_estate(PlayerId(1)));
        assert_eq!(p.estates()[0], Some(PlayerId(0)));
        assert_eq!(p.estates()[1], Some(PlayerId(1)));
        assert_eq!(p.free_slots(), 3);
    }

    #[test]
    fn test_full_province_rejects_estate() {
        let mut p = Province::new(ProvinceId::Litwa, 2);
        for _ in 0..ESTATE_SLOTS {
            assert!(p.build_estate(PlayerId(0)));
        }
        assert!(!p.build_estate(PlayerId(1)));
    }

    #[test]
    fn test_destroy_takes_back_most() {
        let mut p = Province::new(ProvinceId::Prusy, 2);
        p.build_estate(PlayerId(0));
        p.build_estate(PlayerId(1));
        assert_eq!(p.destroy_last_estate(), Some(PlayerId(1)));
        assert_eq!(p.destroy_last_estate(), Some(PlayerId(0)));
        assert_eq!(p.destroy_last_estate(), None);
    }

    #[test]
    fn test_remove_last_estate_of_owner() {
        let mut p = Province::new(ProvinceId::Wielkopolska, 2);
        p.build_estate(PlayerId(0));
        p.build_estate(PlayerId(1));
        p.build_estate(PlayerId(0));
        assert!(p.remove_last_estate_of(PlayerId(0)));
        assert_eq!(p.estates()[2], None);
        assert_eq!(p.estates()[0], Some(PlayerId(0)));
        assert!(!p.remove_last_estate_of(PlayerId(2)));
    }

    #[test]
    fn test_wealth_clamped() {
        let mut p = Province::new(ProvinceId::Ukraina, 9);
        assert_eq!(p.wealth, MAX_WEALTH);
        assert!(!p.enrich());
        p.wealth = 0;
        p.impoverish();
        assert_eq!(p.wealth, 0);
    }
}

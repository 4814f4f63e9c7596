use serde::{Deserialize, Serialize};

use crate::core::types::RaidTrackId;

/// Severity at which a track devastates one of its provinces
pub const DEVASTATION_THRESHOLD: u32 = 3;

/// Severity a track drops to after devastating
pub const POST_DEVASTATION_VALUE: u32 = 1;

/// Invader pressure on the realm's border
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidTrack {
    pub id: RaidTrackId,
    pub value: u32,
}

impl RaidTrack {
    pub fn new(id: RaidTrackId) -> Self {
        Self { id, value: 0 }
    }

    pub fn raise(&mut self, amount: u32) {
        self.value = self.value.saturating_add(amount);
    }

    /// Lower the track, stopping at 0
    pub fn reduce(&mut self, amount: u32) {
        self.value = self.value.saturating_sub(amount);
    }

    pub fn is_threatening(&self) -> bool {
        self.value >= DEVASTATION_THRESHOLD
    }
}

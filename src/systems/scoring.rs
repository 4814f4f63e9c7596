//! Final scoring
//!
//! Applied once at game over, in this order: most estates (+1, shared on
//! a tie, never for zero), +1 per solely controlled province, honor, and
//! one point per three gold.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::types::{PlayerId, ProvinceId};
use crate::systems::influence::sole_controller;
use crate::world::WorldState;

/// Gold needed for one point
pub const GOLD_PER_POINT: u32 = 3;

/// Per-rule points for one player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub player: PlayerId,
    pub name: String,
    pub estates_owned: usize,
    pub most_estates: u32,
    pub provinces: Vec<ProvinceId>,
    pub honor: u32,
    pub gold: u32,
    pub gold_points: u32,
    pub total: u32,
}

impl ScoreLine {
    pub fn control_points(&self) -> u32 {
        self.provinces.len() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub lines: Vec<ScoreLine>,
}

impl ScoreReport {
    /// Highest total; every player sharing it
    pub fn leaders(&self) -> Vec<PlayerId> {
        let best = self.lines.iter().map(|l| l.total).max().unwrap_or(0);
        self.lines.iter().filter(|l| l.total == best).map(|l| l.player).collect()
    }
}

/// Reset and recompute every player's score
pub fn compute_final_scores(world: &mut WorldState) -> ScoreReport {
    let mut lines: Vec<ScoreLine> = world
        .player_ids()
        .map(|id| {
            let p = world.player(id);
            ScoreLine {
                player: id,
                name: p.name.clone(),
                estates_owned: world.estates_of(id),
                honor: p.honor,
                gold: p.gold,
                gold_points: p.gold / GOLD_PER_POINT,
                ..Default::default()
            }
        })
        .collect();

    let most = lines.iter().map(|l| l.estates_owned).max().unwrap_or(0);
    if most > 0 {
        for line in lines.iter_mut().filter(|l| l.estates_owned == most) {
            line.most_estates = 1;
        }
    }

    for province in ProvinceId::ALL {
        if let Some(ctrl) = sole_controller(world, province) {
            lines[ctrl.index()].provinces.push(province);
        }
    }

    for line in &mut lines {
        line.total = line.most_estates + line.control_points() + line.honor + line.gold_points;
        world.player_mut(line.player).score = line.total;
        info!(player = %line.name, score = line.total, "final score");
    }

    ScoreReport { lines }
}

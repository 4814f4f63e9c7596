use crate::game::report::RoundReport;
use crate::phases::{Lines, Phase, PhaseKind};
use crate::systems::battle::resolve_all_battles;
use crate::world::WorldState;

/// Players sharing a province fight it out
pub struct PlayerBattlePhase;

impl Phase for PlayerBattlePhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::PlayerBattle
    }

    fn on_enter(&mut self, world: &mut WorldState, report: &mut RoundReport) -> Lines {
        let duels = resolve_all_battles(world);
        let mut lines: Lines = duels
            .iter()
            .map(|d| {
                format!(
                    "{}: {} {:?} vs {} {:?}; losses {}/{}, left {}/{}.",
                    d.province,
                    world.name(d.first),
                    d.first_rolls,
                    world.name(d.second),
                    d.second_rolls,
                    d.first_losses,
                    d.second_losses,
                    d.first_remaining,
                    d.second_remaining
                )
            })
            .collect();
        if lines.is_empty() {
            lines.push("No province is contested.".to_string());
        }
        report.duels = duels;
        lines
    }
}

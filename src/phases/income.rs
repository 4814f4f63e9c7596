use crate::core::types::PlayerId;
use crate::game::report::RoundReport;
use crate::phases::{Lines, Phase, PhaseKind};
use crate::systems::economy::collect_income;
use crate::world::WorldState;

pub struct IncomePhase;

impl Phase for IncomePhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Income
    }

    fn on_enter(&mut self, world: &mut WorldState, report: &mut RoundReport) -> Lines {
        let income = collect_income(world);
        let lines = income
            .lines
            .iter()
            .map(|l| {
                let p = world.player(PlayerId(l.player));
                let bonus = if l.bonus > 0 { format!(" + fairs {}", l.bonus) } else { String::new() };
                format!(
                    "{}: +{} (control {}, estates {}{}) -> {} gold",
                    p.name,
                    l.total(),
                    l.control,
                    l.estates,
                    bonus,
                    p.gold
                )
            })
            .collect();
        report.income = Some(income);
        lines
    }
}

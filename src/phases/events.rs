use crate::core::error::{Result, SejmError};
use crate::game::report::RoundReport;
use crate::phases::{DecisionRequest, Lines, Phase, PhaseKind};
use crate::systems::events::{apply_event, draw_event, EVENT_COUNT};
use crate::world::WorldState;

/// The marshal names the round's event card, or leaves it to chance
#[derive(Debug, Default)]
pub struct EventsPhase {
    done: bool,
}

impl Phase for EventsPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Events
    }

    fn on_enter(&mut self, _world: &mut WorldState, _report: &mut RoundReport) -> Lines {
        Vec::new()
    }

    fn next_decision(&self, world: &WorldState) -> Option<DecisionRequest> {
        if self.done {
            return None;
        }
        let marshal = world.marshal();
        Some(DecisionRequest::new(
            marshal,
            format!(
                "{}, event card (1-{}, empty to draw)",
                world.name(marshal),
                EVENT_COUNT
            ),
        ))
    }

    fn apply_decision(&mut self, world: &mut WorldState, answer: &str, report: &mut RoundReport) -> Result<Lines> {
        let number = match answer.trim() {
            "" => draw_event(&mut world.rng),
            text => text
                .parse::<u8>()
                .map_err(|_| SejmError::parse(format!("'{}' is not an event number", text)))?,
        };
        let outcome = apply_event(world, number)?;
        self.done = true;

        let mut lines = vec![format!("Event #{}: {}", outcome.number, outcome.name)];
        lines.extend(outcome.details.iter().cloned());
        report.event = Some(outcome);
        Ok(lines)
    }
}

use crate::core::error::Result;
use crate::core::types::PlayerId;
use crate::game::report::RoundReport;
use crate::phases::{DecisionRequest, Lines, Phase, PhaseKind};
use crate::systems::actions::{perform_action, PlayerAction, ACTIONS_PER_ROUND};
use crate::world::WorldState;

const ACTION_MENU: &str = "influence P | build P | recruit P | march A B | enrich P | administer";

/// Two passes round the table, one accepted action per player per pass
#[derive(Debug, Default)]
pub struct ActionsPhase {
    order: Vec<PlayerId>,
    pass: usize,
    next: usize,
}

impl ActionsPhase {
    fn current(&self) -> Option<PlayerId> {
        if self.pass >= ACTIONS_PER_ROUND {
            return None;
        }
        self.order.get(self.next).copied()
    }

    fn advance(&mut self) {
        self.next += 1;
        if self.next >= self.order.len() {
            self.next = 0;
            self.pass += 1;
        }
    }
}

impl Phase for ActionsPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Actions
    }

    fn on_enter(&mut self, world: &mut WorldState, _report: &mut RoundReport) -> Lines {
        self.order = world.turn_order();
        Vec::new()
    }

    fn next_decision(&self, world: &WorldState) -> Option<DecisionRequest> {
        let player = self.current()?;
        let p = world.player(player);
        Some(DecisionRequest::new(
            player,
            format!(
                "{} ({} gold), action {}/{}: {}",
                p.name,
                p.gold,
                self.pass + 1,
                ACTIONS_PER_ROUND,
                ACTION_MENU
            ),
        ))
    }

    fn apply_decision(&mut self, world: &mut WorldState, answer: &str, report: &mut RoundReport) -> Result<Lines> {
        let Some(player) = self.current() else {
            return Ok(Vec::new());
        };
        let action = match answer.trim() {
            "" => PlayerAction::Administer,
            text => text.parse::<PlayerAction>()?,
        };
        let record = perform_action(world, player, action)?;
        let line = if record.gained > 0 {
            format!("{}: {} (+{} gold, now {}).", world.name(player), record.action, record.gained, record.gold_after)
        } else {
            format!("{}: {} (-{} gold, now {}).", world.name(player), record.action, record.cost, record.gold_after)
        };
        report.actions.push(record);
        self.advance();
        Ok(vec![line])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ProvinceId;

    #[test]
    fn test_two_passes_in_turn_order() {
        let mut world = WorldState::for_test(2);
        world.round.marshal = PlayerId(1);
        let mut report = RoundReport::new(1, PlayerId(1));
        let mut phase = ActionsPhase::default();
        phase.on_enter(&mut world, &mut report);

        let mut seen = Vec::new();
        while let Some(req) = phase.next_decision(&world) {
            seen.push(req.player);
            phase.apply_decision(&mut world, "administer", &mut report).unwrap();
        }
        assert_eq!(seen, vec![PlayerId(1), PlayerId(0), PlayerId(1), PlayerId(0)]);
        assert_eq!(report.actions.len(), 4);
        assert!(world.players.iter().all(|p| p.gold == 10));
    }

    #[test]
    fn test_rejected_action_keeps_same_player() {
        let mut world = WorldState::for_test(2);
        let mut report = RoundReport::new(1, PlayerId(0));
        let mut phase = ActionsPhase::default();
        phase.on_enter(&mut world, &mut report);

        assert!(phase.apply_decision(&mut world, "build litwa", &mut report).is_err());
        assert!(phase.apply_decision(&mut world, "dance", &mut report).is_err());
        assert_eq!(phase.next_decision(&world).map(|d| d.player), Some(PlayerId(0)));
        assert_eq!(world.players[0].gold, 6);

        phase.apply_decision(&mut world, "influence litwa", &mut report).unwrap();
        assert_eq!(world.nobles.get(ProvinceId::Litwa, PlayerId(0)), 1);
        assert_eq!(phase.next_decision(&world).map(|d| d.player), Some(PlayerId(1)));
    }
}

//! The three invader phases at the end of a round

use crate::core::error::{Result, SejmError};
use crate::core::types::{PlayerId, ProvinceId, RaidTrackId};
use crate::game::report::{describe_devastation, RoundReport};
use crate::phases::{words, DecisionRequest, Lines, Phase, PhaseKind};
use crate::systems::raids::{attack_invaders, attack_options, reinforce_tracks, run_devastation};
use crate::world::WorldState;

pub struct EnemyReinforcementPhase;

impl Phase for EnemyReinforcementPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::EnemyReinforcement
    }

    fn on_enter(&mut self, world: &mut WorldState, report: &mut RoundReport) -> Lines {
        let reinforcements = reinforce_tracks(world);
        let lines = reinforcements
            .iter()
            .map(|r| format!("{} rolls {}: +{} (now {}).", r.track, r.roll, r.delta, r.now))
            .collect();
        report.reinforcements = reinforcements;
        lines
    }
}

/// Players take turns attacking raid tracks until everyone has passed
///
/// Passing is final for the round. A player with nothing to attack is
/// skipped without being asked.
#[derive(Debug, Default)]
pub struct AttackInvadersPhase {
    order: Vec<PlayerId>,
    passed: Vec<bool>,
    /// Position in `order` to search from
    cursor: usize,
}

impl AttackInvadersPhase {
    /// Position of the next player who has not passed and can attack
    fn current(&self, world: &WorldState) -> Option<usize> {
        let n = self.order.len();
        (0..n)
            .map(|k| (self.cursor + k) % n)
            .find(|&i| !self.passed[i] && !attack_options(world, self.order[i]).is_empty())
    }
}

fn parse_attack(answer: &str) -> Result<(RaidTrackId, ProvinceId)> {
    let mut args = words(answer);
    if matches!(args.first().map(|w| w.to_lowercase()).as_deref(), Some("attack" | "atak")) {
        args.remove(0);
    }
    match args.as_slice() {
        [track, province] => Ok((track.parse()?, province.parse()?)),
        _ => Err(SejmError::parse("expected '<track> <province>' or empty to pass")),
    }
}

impl Phase for AttackInvadersPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::AttackInvaders
    }

    fn on_enter(&mut self, world: &mut WorldState, _report: &mut RoundReport) -> Lines {
        self.order = world.turn_order();
        self.passed = vec![false; self.order.len()];
        self.cursor = 0;
        if self.current(world).is_none() {
            return vec!["Nobody can attack the invaders.".to_string()];
        }
        Vec::new()
    }

    fn next_decision(&self, world: &WorldState) -> Option<DecisionRequest> {
        let player = self.order[self.current(world)?];
        let options: Vec<String> = attack_options(world, player)
            .into_iter()
            .map(|(track, province)| format!("{} {}", track, province))
            .collect();
        Some(DecisionRequest::new(
            player,
            format!(
                "{}, attack invaders ({}) or empty to pass",
                world.name(player),
                options.join(" | ")
            ),
        ))
    }

    fn apply_decision(&mut self, world: &mut WorldState, answer: &str, report: &mut RoundReport) -> Result<Lines> {
        let Some(i) = self.current(world) else {
            return Ok(Vec::new());
        };
        let player = self.order[i];
        let answer = answer.trim();
        if answer.is_empty() || answer.eq_ignore_ascii_case("pass") {
            self.passed[i] = true;
            self.cursor = (i + 1) % self.order.len();
            return Ok(vec![format!("{} passes.", world.name(player))]);
        }

        let (track, province) = parse_attack(answer)?;
        let result = attack_invaders(world, player, track, province)?;
        let line = format!(
            "{} attacks {} from {}: rolls {:?}{}; {} -{}, units lost {}, honor +{}.",
            world.name(player),
            track,
            province,
            result.rolls,
            if result.artillery { " (artillery)" } else { "" },
            track,
            result.track_reduced,
            result.units_lost,
            result.honor_gained
        );
        report.attacks.push(result);
        self.cursor = (i + 1) % self.order.len();
        Ok(vec![line])
    }
}

pub struct DevastationPhase;

impl Phase for DevastationPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Devastation
    }

    fn on_enter(&mut self, world: &mut WorldState, report: &mut RoundReport) -> Lines {
        let devastations = run_devastation(world);
        let mut lines: Lines = devastations.iter().map(|d| describe_devastation(world, d)).collect();
        if lines.is_empty() {
            lines.push("The borders hold.".to_string());
        }
        report.devastations = devastations;
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack_phase(world: &mut WorldState) -> (AttackInvadersPhase, RoundReport) {
        let mut report = RoundReport::new(1, PlayerId(0));
        let mut phase = AttackInvadersPhase::default();
        phase.on_enter(world, &mut report);
        (phase, report)
    }

    #[test]
    fn test_parse_attack_forms() {
        assert_eq!(
            parse_attack("attack szwecja prusy").unwrap(),
            (RaidTrackId::Szwecja, ProvinceId::Prusy)
        );
        assert_eq!(parse_attack("Tatarzy Małopolska").unwrap(), (RaidTrackId::Tatarzy, ProvinceId::Malopolska));
        assert!(parse_attack("szwecja").is_err());
    }

    #[test]
    fn test_players_without_options_are_skipped() {
        let mut world = WorldState::for_test(3);
        world.track_mut(RaidTrackId::Moskwa).value = 2;
        world.troops.set(ProvinceId::Ukraina, PlayerId(2), 1);
        let (phase, _) = attack_phase(&mut world);
        assert_eq!(phase.next_decision(&world).map(|d| d.player), Some(PlayerId(2)));
    }

    #[test]
    fn test_pass_is_final() {
        let mut world = WorldState::for_test(2);
        world.track_mut(RaidTrackId::Szwecja).value = 3;
        world.troops.set(ProvinceId::Prusy, PlayerId(0), 2);
        world.troops.set(ProvinceId::Litwa, PlayerId(1), 2);
        let (mut phase, mut report) = attack_phase(&mut world);

        phase.apply_decision(&mut world, "", &mut report).unwrap();
        assert_eq!(phase.next_decision(&world).map(|d| d.player), Some(PlayerId(1)));
        phase.apply_decision(&mut world, "pass", &mut report).unwrap();
        assert!(phase.next_decision(&world).is_none());
        assert!(report.attacks.is_empty());
    }

    #[test]
    fn test_attack_then_rotate() {
        let mut world = WorldState::for_test(2);
        world.track_mut(RaidTrackId::Szwecja).value = 10;
        world.troops.set(ProvinceId::Prusy, PlayerId(0), 2);
        world.troops.set(ProvinceId::Litwa, PlayerId(1), 2);
        let (mut phase, mut report) = attack_phase(&mut world);

        assert!(phase.apply_decision(&mut world, "moskwa prusy", &mut report).is_err());
        phase.apply_decision(&mut world, "szwecja prusy", &mut report).unwrap();
        assert_eq!(report.attacks.len(), 1);
        assert!(world.players[0].honor >= 2);
        assert_eq!(phase.next_decision(&world).map(|d| d.player), Some(PlayerId(1)));
    }

    #[test]
    fn test_empty_answers_always_finish() {
        let mut world = WorldState::for_test(3);
        world.track_mut(RaidTrackId::Tatarzy).value = 5;
        for i in 0..3 {
            world.troops.set(ProvinceId::Ukraina, PlayerId(i), 3);
        }
        let (mut phase, mut report) = attack_phase(&mut world);
        let mut asked = 0;
        while phase.next_decision(&world).is_some() {
            phase.apply_decision(&mut world, "", &mut report).unwrap();
            asked += 1;
        }
        assert_eq!(asked, 3);
    }

    #[test]
    fn test_devastation_phase_reports() {
        let mut world = WorldState::for_test(2);
        world.track_mut(RaidTrackId::Szwecja).value = 3;
        let mut report = RoundReport::new(1, PlayerId(0));
        let lines = DevastationPhase.on_enter(&mut world, &mut report);
        assert_eq!(lines.len(), 1);
        assert_eq!(report.devastations.len(), 1);
        assert_eq!(world.track(RaidTrackId::Szwecja).value, 1);
    }
}

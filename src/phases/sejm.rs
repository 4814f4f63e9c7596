//! Legislation
//!
//! The majority holder picks a law and, for every law but Fortification,
//! a variant. Levy A and Fortification then go round the table; Levy B
//! and Peace B ask the holder for a track.

use tracing::debug;

use crate::core::error::{Result, SejmError};
use crate::core::types::{LawVariant, PlayerId, ProvinceId, RaidTrackId};
use crate::game::report::{LawRecord, RoundReport};
use crate::phases::{DecisionRequest, Lines, Phase, PhaseKind};
use crate::systems::legislation::{
    apply_general_peace, apply_taxation, fort_options, levy_options, place_fort, place_levy, record_variant,
    reduce_track, select_law, Law, LawEffect, SINGLE_TRACK_RELIEF,
};
use crate::world::WorldState;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    ChooseLaw,
    ChooseVariant(Law),
    ChooseTrack,
    Levy,
    Fort,
    Done,
}

#[derive(Debug)]
pub struct SejmPhase {
    step: Step,
    holder: Option<PlayerId>,
    /// Players still to place a levy troop or a fort
    queue: Vec<PlayerId>,
}

impl Default for SejmPhase {
    fn default() -> Self {
        Self { step: Step::Done, holder: None, queue: Vec::new() }
    }
}

impl SejmPhase {
    fn finish(&mut self) {
        self.step = Step::Done;
        self.queue.clear();
    }

    fn next_in_queue(&mut self) {
        if !self.queue.is_empty() {
            self.queue.remove(0);
        }
        if self.queue.is_empty() {
            self.finish();
        }
    }

    fn push_effect(report: &mut RoundReport, effect: LawEffect) {
        if let Some(law) = report.law.as_mut() {
            law.effects.push(effect);
        }
    }

    fn start_levy(&mut self, world: &WorldState) -> Lines {
        self.queue = world
            .turn_order()
            .into_iter()
            .filter(|&p| !levy_options(world, p).is_empty())
            .collect();
        if self.queue.is_empty() {
            self.finish();
            return vec!["Nobody solely controls a province; no troops are levied.".to_string()];
        }
        self.step = Step::Levy;
        Vec::new()
    }

    fn start_fortification(&mut self, world: &WorldState) -> Lines {
        self.queue = world
            .turn_order()
            .into_iter()
            .filter(|&p| !fort_options(world, p).is_empty())
            .collect();
        if self.queue.is_empty() {
            self.finish();
            return vec!["Nobody can build a fort.".to_string()];
        }
        self.step = Step::Fort;
        Vec::new()
    }

    fn apply_law(&mut self, world: &mut WorldState, answer: &str, report: &mut RoundReport) -> Result<Lines> {
        let Some(holder) = self.holder else {
            self.finish();
            return Ok(Vec::new());
        };
        let answer = answer.trim();
        if answer.is_empty() {
            self.finish();
            return Ok(vec![format!("{} passes no law.", world.name(holder))]);
        }
        let number = answer
            .parse::<u8>()
            .map_err(|_| SejmError::parse(format!("'{}' is not a law number", answer)))?;
        let law = select_law(world, number)?;
        report.law = Some(LawRecord { number, law, variant: None, effects: Vec::new() });

        let mut lines = vec![format!("{} proposes law {}: {}.", world.name(holder), number, law)];
        if law.has_variants() {
            self.step = Step::ChooseVariant(law);
        } else {
            record_variant(world, LawVariant::A);
            if let Some(record) = report.law.as_mut() {
                record.variant = Some(LawVariant::A);
            }
            lines.extend(self.start_fortification(world));
        }
        Ok(lines)
    }

    fn apply_variant(
        &mut self,
        world: &mut WorldState,
        law: Law,
        answer: &str,
        report: &mut RoundReport,
    ) -> Result<Lines> {
        let variant = match answer.trim() {
            "" => LawVariant::A,
            text => text.parse::<LawVariant>()?,
        };
        let holder = self.holder.unwrap_or_else(|| world.marshal());
        record_variant(world, variant);
        if let Some(record) = report.law.as_mut() {
            record.variant = Some(variant);
        }

        let mut lines = vec![format!("{} {} is passed.", law, variant)];
        match (law, variant) {
            (Law::Taxation, _) => {
                let effect = apply_taxation(world, variant, holder);
                Self::push_effect(report, effect);
                lines.push(match variant {
                    LawVariant::A => "Every player gains 2 gold.".to_string(),
                    LawVariant::B => format!("Every player gains 1 gold; {} gains 4.", world.name(holder)),
                });
                self.finish();
            }
            (Law::Levy, LawVariant::A) => lines.extend(self.start_levy(world)),
            (Law::Levy, LawVariant::B) | (Law::Peace, LawVariant::B) => self.step = Step::ChooseTrack,
            (Law::Peace, LawVariant::A) => {
                for effect in apply_general_peace(world) {
                    if let LawEffect::TrackReduced { track, now, .. } = &effect {
                        lines.push(format!("{} eases to {}.", track, now));
                    }
                    Self::push_effect(report, effect);
                }
                self.finish();
            }
            (Law::Fortification, _) => lines.extend(self.start_fortification(world)),
        }
        Ok(lines)
    }

    fn apply_track(&mut self, world: &mut WorldState, answer: &str, report: &mut RoundReport) -> Result<Lines> {
        let track = match answer.trim() {
            "" => most_threatening(world),
            text => text.parse::<RaidTrackId>()?,
        };
        let effect = reduce_track(world, track, SINGLE_TRACK_RELIEF);
        let line = match &effect {
            LawEffect::TrackReduced { now, .. } => format!("{} is pushed back to {}.", track, now),
            _ => String::new(),
        };
        Self::push_effect(report, effect);
        self.finish();
        Ok(vec![line])
    }

    fn apply_levy(&mut self, world: &mut WorldState, answer: &str, report: &mut RoundReport) -> Result<Lines> {
        let Some(&player) = self.queue.first() else {
            self.finish();
            return Ok(Vec::new());
        };
        let options = levy_options(world, player);
        let province = match answer.trim() {
            "" => match options.first() {
                Some(&p) => p,
                None => {
                    self.next_in_queue();
                    return Ok(Vec::new());
                }
            },
            text => text.parse::<ProvinceId>()?,
        };
        let effect = place_levy(world, player, province)?;
        Self::push_effect(report, effect);
        self.next_in_queue();
        Ok(vec![format!("{} levies a troop in {}.", world.name(player), province)])
    }

    fn apply_fort(&mut self, world: &mut WorldState, answer: &str, report: &mut RoundReport) -> Result<Lines> {
        let Some(&player) = self.queue.first() else {
            self.finish();
            return Ok(Vec::new());
        };
        let answer = answer.trim();
        if answer.is_empty() {
            self.next_in_queue();
            return Ok(vec![format!("{} builds no fort.", world.name(player))]);
        }
        let province = answer.parse::<ProvinceId>()?;
        let effect = place_fort(world, player, province)?;
        Self::push_effect(report, effect);
        self.next_in_queue();
        Ok(vec![format!("{} builds a fort in {}.", world.name(player), province)])
    }
}

/// Highest track, first in track order on a tie
fn most_threatening(world: &WorldState) -> RaidTrackId {
    RaidTrackId::ALL
        .into_iter()
        .rev()
        .max_by_key(|&t| world.track(t).value)
        .unwrap_or(RaidTrackId::Szwecja)
}

fn list(provinces: &[ProvinceId]) -> String {
    provinces.iter().map(|p| p.name()).collect::<Vec<_>>().join(", ")
}

impl Phase for SejmPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Sejm
    }

    fn on_enter(&mut self, world: &mut WorldState, _report: &mut RoundReport) -> Lines {
        if world.round.modifiers.sejm_cancelled {
            self.finish();
            return vec!["The sejm is cancelled; no law this round.".to_string()];
        }
        self.holder = world.majority_holder();
        match self.holder {
            Some(_) => {
                self.step = Step::ChooseLaw;
                Vec::new()
            }
            None => {
                self.finish();
                vec!["No majority; no law is passed.".to_string()]
            }
        }
    }

    fn next_decision(&self, world: &WorldState) -> Option<DecisionRequest> {
        let holder = self.holder?;
        let holder_name = world.name(holder);
        match &self.step {
            Step::ChooseLaw => Some(DecisionRequest::new(
                holder,
                format!(
                    "{}, choose a law: 1-2 Taxation, 3-4 Levy, 5 Fortification, 6 Peace (empty to pass)",
                    holder_name
                ),
            )),
            Step::ChooseVariant(law) => Some(DecisionRequest::new(
                holder,
                format!("{}, {} variant A or B", holder_name, law),
            )),
            Step::ChooseTrack => Some(DecisionRequest::new(
                holder,
                format!("{}, raid track to push back by {} (Szwecja, Tatarzy, Moskwa)", holder_name, SINGLE_TRACK_RELIEF),
            )),
            Step::Levy => {
                let player = *self.queue.first()?;
                Some(DecisionRequest::new(
                    player,
                    format!(
                        "{}, place a levied troop in: {}",
                        world.name(player),
                        list(&levy_options(world, player))
                    ),
                ))
            }
            Step::Fort => {
                let player = *self.queue.first()?;
                Some(DecisionRequest::new(
                    player,
                    format!(
                        "{}, build a fort in: {} (empty to skip)",
                        world.name(player),
                        list(&fort_options(world, player))
                    ),
                ))
            }
            Step::Done => None,
        }
    }

    fn apply_decision(&mut self, world: &mut WorldState, answer: &str, report: &mut RoundReport) -> Result<Lines> {
        debug!(step = ?self.step, answer, "sejm decision");
        match self.step.clone() {
            Step::ChooseLaw => self.apply_law(world, answer, report),
            Step::ChooseVariant(law) => self.apply_variant(world, law, answer, report),
            Step::ChooseTrack => self.apply_track(world, answer, report),
            Step::Levy => self.apply_levy(world, answer, report),
            Step::Fort => self.apply_fort(world, answer, report),
            Step::Done => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sejm_with_holder(n: usize, holder: usize) -> (WorldState, SejmPhase, RoundReport) {
        let mut world = WorldState::for_test(n);
        world.players[holder].majority = true;
        let mut report = RoundReport::new(1, PlayerId(0));
        let mut phase = SejmPhase::default();
        phase.on_enter(&mut world, &mut report);
        (world, phase, report)
    }

    #[test]
    fn test_no_majority_skips() {
        let mut world = WorldState::for_test(2);
        let mut report = RoundReport::new(1, PlayerId(0));
        let mut phase = SejmPhase::default();
        let lines = phase.on_enter(&mut world, &mut report);
        assert!(lines[0].contains("No majority"));
        assert!(phase.next_decision(&world).is_none());
    }

    #[test]
    fn test_taxation_b_through_decisions() {
        let (mut world, mut phase, mut report) = sejm_with_holder(2, 1);
        assert_eq!(phase.next_decision(&world).map(|d| d.player), Some(PlayerId(1)));
        assert!(phase.apply_decision(&mut world, "9", &mut report).is_err());
        phase.apply_decision(&mut world, "2", &mut report).unwrap();
        phase.apply_decision(&mut world, "b", &mut report).unwrap();
        assert!(phase.next_decision(&world).is_none());
        assert_eq!(world.players[0].gold, 7);
        assert_eq!(world.players[1].gold, 10);
        assert_eq!(world.round.last_law, Some(2));
        assert_eq!(world.round.last_law_variant, Some(LawVariant::B));
        assert_eq!(report.law.map(|l| l.effects.len()), Some(1));
    }

    #[test]
    fn test_empty_law_answer_declines() {
        let (mut world, mut phase, mut report) = sejm_with_holder(2, 0);
        phase.apply_decision(&mut world, "", &mut report).unwrap();
        assert!(phase.next_decision(&world).is_none());
        assert_eq!(world.round.last_law, None);
    }

    #[test]
    fn test_peace_b_defaults_to_worst_track() {
        let (mut world, mut phase, mut report) = sejm_with_holder(2, 0);
        world.track_mut(RaidTrackId::Tatarzy).value = 4;
        world.track_mut(RaidTrackId::Moskwa).value = 4;
        phase.apply_decision(&mut world, "6", &mut report).unwrap();
        phase.apply_decision(&mut world, "B", &mut report).unwrap();
        phase.apply_decision(&mut world, "", &mut report).unwrap();
        assert_eq!(world.track(RaidTrackId::Tatarzy).value, 2);
        assert_eq!(world.track(RaidTrackId::Moskwa).value, 4);
    }

    #[test]
    fn test_levy_a_goes_round_eligible_players() {
        let (mut world, mut phase, mut report) = sejm_with_holder(3, 0);
        world.nobles.set(ProvinceId::Litwa, PlayerId(2), 1);
        world.nobles.set(ProvinceId::Prusy, PlayerId(2), 1);
        world.nobles.set(ProvinceId::Ukraina, PlayerId(1), 1);
        phase.apply_decision(&mut world, "3", &mut report).unwrap();
        phase.apply_decision(&mut world, "a", &mut report).unwrap();

        assert_eq!(phase.next_decision(&world).map(|d| d.player), Some(PlayerId(1)));
        assert!(phase.apply_decision(&mut world, "litwa", &mut report).is_err());
        phase.apply_decision(&mut world, "", &mut report).unwrap();
        assert_eq!(world.troops.get(ProvinceId::Ukraina, PlayerId(1)), 1);

        assert_eq!(phase.next_decision(&world).map(|d| d.player), Some(PlayerId(2)));
        phase.apply_decision(&mut world, "Prusy", &mut report).unwrap();
        assert_eq!(world.troops.get(ProvinceId::Prusy, PlayerId(2)), 1);
        assert!(phase.next_decision(&world).is_none());
    }

    #[test]
    fn test_fortification_skips_variant_and_may_be_declined() {
        let (mut world, mut phase, mut report) = sejm_with_holder(2, 0);
        world.nobles.set(ProvinceId::Litwa, PlayerId(0), 1);
        world.nobles.set(ProvinceId::Ukraina, PlayerId(1), 1);
        phase.apply_decision(&mut world, "5", &mut report).unwrap();
        assert_eq!(world.round.last_law_variant, Some(LawVariant::A));

        phase.apply_decision(&mut world, "litwa", &mut report).unwrap();
        phase.apply_decision(&mut world, "", &mut report).unwrap();
        assert!(world.province(ProvinceId::Litwa).has_fort);
        assert!(!world.province(ProvinceId::Ukraina).has_fort);
        assert!(phase.next_decision(&world).is_none());
    }
}

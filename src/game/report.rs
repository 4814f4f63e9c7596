//! Round and score reports
//!
//! Everything a round did, kept as data so a session can be replayed on
//! screen or dumped as JSON.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{LawVariant, PlayerId, ProvinceId, RaidTrackId, Round};
use crate::systems::legislation::{Law, LawEffect};
use crate::systems::raids::Ruin;
use crate::systems::{
    ActionRecord, AttackResult, AuctionOutcome, Devastation, DuelResult, EventOutcome, IncomeResult,
    Reinforcement, ScoreReport,
};
use crate::world::WorldState;

/// The law passed this round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawRecord {
    pub number: u8,
    pub law: Law,
    pub variant: Option<LawVariant>,
    pub effects: Vec<LawEffect>,
}

/// A player's purse at the end of a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub gold: u32,
    pub honor: u32,
    pub estates: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: Round,
    pub marshal: PlayerId,
    pub event: Option<EventOutcome>,
    pub income: Option<IncomeResult>,
    pub auction: Option<AuctionOutcome>,
    pub law: Option<LawRecord>,
    pub actions: Vec<ActionRecord>,
    pub duels: Vec<DuelResult>,
    pub reinforcements: Vec<Reinforcement>,
    pub attacks: Vec<AttackResult>,
    pub devastations: Vec<Devastation>,
    pub standings: Vec<Standing>,
}

impl RoundReport {
    pub fn new(round: Round, marshal: PlayerId) -> Self {
        Self {
            round,
            marshal,
            event: None,
            income: None,
            auction: None,
            law: None,
            actions: Vec::new(),
            duels: Vec::new(),
            reinforcements: Vec::new(),
            attacks: Vec::new(),
            devastations: Vec::new(),
            standings: Vec::new(),
        }
    }

    /// Snapshot every player's gold and honor
    pub fn record_standings(&mut self, world: &WorldState) {
        self.standings = world
            .player_ids()
            .map(|id| {
                let p = world.player(id);
                Standing {
                    player: id,
                    name: p.name.clone(),
                    gold: p.gold,
                    honor: p.honor,
                    estates: world.estates_of(id),
                }
            })
            .collect();
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        let mut out = format!("Round {} summary\n", self.round);
        if let Some(event) = &self.event {
            out.push_str(&format!("  event: #{} {}\n", event.number, event.name));
        }
        match &self.auction {
            Some(AuctionOutcome::Won { player, bid, .. }) => {
                out.push_str(&format!("  majority: {} for {} gold\n", self.name(*player), bid));
            }
            Some(AuctionOutcome::Skipped) => out.push_str("  sejm: cancelled\n"),
            _ => out.push_str("  majority: none\n"),
        }
        if let Some(law) = &self.law {
            let variant = law.variant.map(|v| format!(" {}", v)).unwrap_or_default();
            out.push_str(&format!("  law: {} ({}{})\n", law.number, law.law, variant));
        }
        out.push_str(&format!(
            "  actions: {}, duels: {}, attacks: {}, devastations: {}\n",
            self.actions.len(),
            self.duels.len(),
            self.attacks.len(),
            self.devastations.len()
        ));
        for s in &self.standings {
            out.push_str(&format!(
                "  {}: {} gold, {} honor, {} estates\n",
                s.name, s.gold, s.honor, s.estates
            ));
        }
        out
    }

    fn name(&self, player: PlayerId) -> String {
        self.standings
            .iter()
            .find(|s| s.player == player)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| player.to_string())
    }
}

impl ScoreReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        let mut out = String::from("Final scores\n");
        for line in &self.lines {
            out.push_str(&format!(
                "  {}: {} (estates {}, provinces {}, honor {}, gold {})\n",
                line.name,
                line.total,
                line.most_estates,
                line.control_points(),
                line.honor,
                line.gold_points
            ));
        }
        let winners: Vec<&str> = self
            .leaders()
            .into_iter()
            .filter_map(|id| self.lines.get(id.index()).map(|l| l.name.as_str()))
            .collect();
        out.push_str(&format!("Winner: {}\n", winners.join(", ")));
        out
    }
}

/// Board state, one line per item, for the start of a round
pub fn status_lines(world: &WorldState) -> Vec<String> {
    let mut lines = Vec::new();
    for id in world.player_ids() {
        let p = world.player(id);
        lines.push(format!("{}: {} gold, {} honor", p.name, p.gold, p.honor));
    }
    for province in ProvinceId::ALL {
        let prov = world.province(province);
        let nobles = world.nobles.in_province(province);
        let troops = world.troops.in_province(province);
        lines.push(format!(
            "{}: wealth {}{}, nobles {:?}, troops {:?}, estates {}",
            province,
            prov.wealth,
            if prov.has_fort { ", fort" } else { "" },
            nobles,
            troops,
            estate_row(world, province)
        ));
    }
    let tracks: Vec<String> = RaidTrackId::ALL
        .into_iter()
        .map(|t| format!("{} {}", t, world.track(t).value))
        .collect();
    lines.push(format!("Invaders: {}", tracks.join(", ")));
    lines
}

fn estate_row(world: &WorldState, province: ProvinceId) -> String {
    world
        .province(province)
        .estates()
        .iter()
        .map(|slot| match slot {
            Some(owner) => owner.index().to_string(),
            None => "-".to_string(),
        })
        .collect::<Vec<_>>()
        .join("")
}

/// One human-readable line per devastation
pub fn describe_devastation(world: &WorldState, d: &Devastation) -> String {
    let what = match d.ruin {
        Ruin::Fort => "the fort is razed".to_string(),
        Ruin::Estate(owner) => format!("an estate of {} burns", world.name(owner)),
        Ruin::Nothing => "nothing left to burn".to_string(),
    };
    format!(
        "{} devastates {} (roll {}): {}, wealth now {}.",
        d.track, d.province, d.roll, what, d.wealth_now
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::compute_final_scores;

    #[test]
    fn test_round_report_serializes() {
        let mut world = WorldState::for_test(2);
        let mut report = RoundReport::new(1, PlayerId(0));
        report.auction = Some(AuctionOutcome::Won { player: PlayerId(1), bid: 3, tiebreak: false });
        report.record_standings(&world);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"round\": 1"));
        assert!(report.summary().contains("majority: P1 for 3 gold"));

        world.players[0].gold = 0;
        report.record_standings(&world);
        assert_eq!(report.standings[0].gold, 0);
    }

    #[test]
    fn test_score_summary_names_winner() {
        let mut world = WorldState::for_test(2);
        world.players[1].honor = 2;
        let scores = compute_final_scores(&mut world);
        let text = scores.summary();
        assert!(text.contains("Winner: P1"));
        assert!(scores.to_json().unwrap().contains("\"total\": 4"));
    }

    #[test]
    fn test_status_lists_every_province() {
        let world = WorldState::for_test(2);
        let lines = status_lines(&world);
        assert_eq!(lines.len(), 2 + 5 + 1);
        assert!(lines.iter().any(|l| l.starts_with("Małopolska")));
    }
}

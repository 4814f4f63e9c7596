//! Game session and round orchestration
//!
//! A session moves Setup -> Gameplay -> GameOver. Each round runs the
//! phases in order, asking the input source for every decision and
//! sending every produced line to the output sink. Recoverable errors are
//! shown to the player and the same question is asked again.

pub mod io;
pub mod report;

pub use io::{InputSource, OutputSink, RecordingSink, ScriptedInput, StdioInput, StdoutSink};
pub use report::{LawRecord, RoundReport, Standing};

use tracing::{info, warn};

use crate::core::config::GameConfig;
use crate::core::error::{Result, SejmError};
use crate::core::types::Round;
use crate::phases::{round_phases, Lines};
use crate::systems::scoring::{compute_final_scores, ScoreReport};
use crate::world::WorldState;

/// Start a game with default settings and the given number of rounds
pub fn new_game(names: &[String], rounds: Round) -> Result<WorldState> {
    let config = GameConfig { rounds, ..GameConfig::default() };
    WorldState::new(names, config)
}

pub fn is_game_over(world: &WorldState) -> bool {
    world.round.is_complete()
}

/// Score the board as it stands
pub fn final_scores(world: &mut WorldState) -> ScoreReport {
    compute_final_scores(world)
}

fn emit_all(output: &mut impl OutputSink, lines: Lines) {
    for line in lines {
        output.emit_line(&line);
    }
}

/// Play one full round and move on to the next
pub fn run_round(
    world: &mut WorldState,
    input: &mut impl InputSource,
    output: &mut impl OutputSink,
) -> Result<RoundReport> {
    if is_game_over(world) {
        return Err(SejmError::GameOver);
    }

    world.begin_round();
    let round = world.round.current_round;
    let mut report = RoundReport::new(round, world.marshal());
    output.emit_line(&format!(
        "=== Round {} of {} (marshal: {}) ===",
        round,
        world.round.total_rounds,
        world.name(world.marshal())
    ));
    emit_all(output, report::status_lines(world));

    for mut phase in round_phases() {
        info!(round, phase = phase.name(), "phase started");
        output.emit_line(&format!("--- {} ---", phase.name()));
        emit_all(output, phase.on_enter(world, &mut report));

        while let Some(request) = phase.next_decision(world) {
            let answer = input.request_line(&request.prompt);
            match phase.apply_decision(world, &answer, &mut report) {
                Ok(lines) => emit_all(output, lines),
                Err(e) if e.is_recoverable() => {
                    warn!(player = %world.name(request.player), answer = %answer, error = %e, "input rejected");
                    output.emit_line(&e.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        emit_all(output, phase.on_exit(world, &mut report));
    }

    report.record_standings(world);
    world.round.advance(world.player_count());
    info!(round, "round finished");
    Ok(report)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Setup,
    Gameplay,
    GameOver,
}

/// One game from setup to final scores
pub struct GameSession {
    pub world: WorldState,
    pub reports: Vec<RoundReport>,
    state: GameState,
}

impl GameSession {
    pub fn new(names: &[String], config: GameConfig) -> Result<Self> {
        let world = WorldState::new(names, config)?;
        info!(players = world.player_count(), rounds = world.round.total_rounds, "new game");
        Ok(Self { world, reports: Vec::new(), state: GameState::Setup })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Play the next round
    pub fn play_round(
        &mut self,
        input: &mut impl InputSource,
        output: &mut impl OutputSink,
    ) -> Result<&RoundReport> {
        if self.state == GameState::GameOver {
            return Err(SejmError::GameOver);
        }
        self.state = GameState::Gameplay;
        let report = run_round(&mut self.world, input, output)?;
        if is_game_over(&self.world) {
            self.state = GameState::GameOver;
        }
        self.reports.push(report);
        self.reports.last().ok_or(SejmError::GameOver)
    }

    /// Play every remaining round and score the game
    pub fn play_to_end(
        &mut self,
        input: &mut impl InputSource,
        output: &mut impl OutputSink,
    ) -> Result<ScoreReport> {
        while self.state != GameState::GameOver {
            self.play_round(input, output)?;
        }
        let scores = self.final_scores();
        output.emit_line("=== Game over ===");
        for line in scores.summary().lines() {
            output.emit_line(line);
        }
        Ok(scores)
    }

    pub fn final_scores(&mut self) -> ScoreReport {
        final_scores(&mut self.world)
    }
}

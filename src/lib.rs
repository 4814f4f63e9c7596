//! Sejm - a round-based territorial-control board game
//!
//! Players bid for the sejm majority, pass laws, spend gold on nobles,
//! estates and troops, fight each other and push back invaders across the
//! five provinces of the Commonwealth.

pub mod core;
pub mod game;
pub mod phases;
pub mod systems;
pub mod world;

pub use crate::core::{GameConfig, PlayerId, ProvinceId, RaidTrackId, Result, SejmError};
pub use crate::game::{final_scores, is_game_over, new_game, run_round, GameSession, GameState, RoundReport};
pub use crate::systems::ScoreReport;
pub use crate::world::WorldState;

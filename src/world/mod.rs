//! World state
//!
//! Everything a game session mutates: players, provinces, invader tracks,
//! the troop and noble boards, and the round status.

pub mod board;
pub mod player;
pub mod province;
pub mod raid;
pub mod round;
pub mod state;

pub use board::UnitBoard;
pub use player::Player;
pub use province::{Province, ESTATE_SLOTS, MAX_WEALTH};
pub use raid::{RaidTrack, DEVASTATION_THRESHOLD, POST_DEVASTATION_VALUE};
pub use round::{RoundModifiers, RoundStatus, DEFAULT_ADMIN_YIELD};
pub use state::WorldState;

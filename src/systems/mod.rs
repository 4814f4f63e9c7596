//! Game rule systems
//!
//! Each system is a set of free functions over `&mut WorldState` that
//! return a result value describing what happened. None of them do I/O.

pub mod actions;
pub mod auction;
pub mod battle;
pub mod economy;
pub mod events;
pub mod influence;
pub mod legislation;
pub mod raids;
pub mod scoring;

pub use actions::{perform_action, validate_action, ActionRecord, PlayerAction};
pub use auction::{place_bid, resolve_auction, AuctionOutcome};
pub use battle::{resolve_all_battles, resolve_duel, DuelResult};
pub use economy::{collect_income, IncomeResult};
pub use events::{apply_event, draw_event, EventOutcome};
pub use influence::{controllers, sole_controller};
pub use legislation::{Law, LawEffect};
pub use raids::{attack_invaders, reinforce_tracks, run_devastation, AttackResult, Devastation, Reinforcement};
pub use scoring::{compute_final_scores, ScoreLine, ScoreReport};

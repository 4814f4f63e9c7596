pub mod config;
pub mod dice;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{Result, RuleViolation, SejmError};
pub use types::{LawVariant, PlayerId, ProvinceId, RaidTrackId, Round};

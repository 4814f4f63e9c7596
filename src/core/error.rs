use thiserror::Error;

use crate::core::types::{ProvinceId, RaidTrackId};

/// A move that parses but breaks a rule of the game.
///
/// Every variant is recoverable: the orchestrator reports it and asks the
/// same player again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("not enough gold: costs {cost}, you have {available}")]
    InsufficientGold { cost: u32, available: u32 },

    #[error("you need a noble in {0}")]
    NoNoble(ProvinceId),

    #[error("no free estate slot in {0}")]
    NoFreeEstateSlot(ProvinceId),

    #[error("wealth of {0} is already at its maximum")]
    WealthAtCap(ProvinceId),

    #[error("you have no troops in {0}")]
    NoTroops(ProvinceId),

    #[error("cannot march from {0} to itself")]
    SameProvince(ProvinceId),

    #[error("{track} cannot be attacked from {province}")]
    NotAnAttackSource { track: RaidTrackId, province: ProvinceId },

    #[error("{0} is already at 0")]
    TrackCleared(RaidTrackId),

    #[error("you do not solely control {0}")]
    NotSoleController(ProvinceId),

    #[error("{0} already has a fort")]
    FortExists(ProvinceId),

    #[error("bid must be between 0 and {max}")]
    BidOutOfRange { max: u32 },
}

#[derive(Error, Debug)]
pub enum SejmError {
    #[error("Could not understand input: {0}")]
    Parse(String),

    #[error("Rule violation: {0}")]
    Rule(#[from] RuleViolation),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("The game is already over")]
    GameOver,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl SejmError {
    /// Errors a player can fix by answering the prompt again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SejmError::Parse(_) | SejmError::Rule(_))
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        SejmError::Parse(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SejmError>;

//! Game configuration with documented constants
//!
//! Everything a table may want to change before a game starts lives here.
//! Rules that never vary (action costs, dice thresholds) stay next to the
//! systems that use them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SejmError};

/// Most players a board supports
pub const MAX_PLAYERS: usize = 6;

/// Configuration for one game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Gold each player starts with
    pub starting_gold: u32,

    /// Number of rounds before final scoring
    pub rounds: u32,

    /// Wealth every province starts at (0..=3)
    ///
    /// At 2 an estate pays 1 gold per round; one enrich action makes it 2.
    pub starting_wealth: u8,

    /// Seed for every die roll and random event
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_gold: 6,
            rounds: 3,
            starting_wealth: 2,
            seed: 12345,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(SejmError::Config("rounds must be at least 1".into()));
        }
        if self.starting_wealth > 3 {
            return Err(SejmError::Config(format!(
                "starting_wealth ({}) must be between 0 and 3",
                self.starting_wealth
            )));
        }
        Ok(())
    }

    /// Check a roster against the board's limits
    pub fn validate_players(&self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Err(SejmError::Config("at least one player is required".into()));
        }
        if names.len() > MAX_PLAYERS {
            return Err(SejmError::Config(format!(
                "at most {} players fit on the board, got {}",
                MAX_PLAYERS,
                names.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str("rounds = 5\nseed = 7\n").unwrap();
        assert_eq!(config.rounds, 5);
        assert_eq!(config.seed, 7);
        assert_eq!(config.starting_gold, 6);
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let err = GameConfig::from_toml_str("rounds = 0").unwrap_err();
        assert!(matches!(err, SejmError::Config(_)));
    }

    #[test]
    fn test_player_limits() {
        let config = GameConfig::default();
        assert!(config.validate_players(&[]).is_err());
        let seven: Vec<String> = (0..7).map(|i| format!("P{}", i)).collect();
        assert!(config.validate_players(&seven).is_err());
        assert!(config.validate_players(&seven[..2]).is_ok());
    }
}

//! Match configuration.
//!
//! A match is configured once at construction:
//! - `ParticipantDefaults`: starting pools for every participant
//! - `MatchConfig`: participant count, defaults, optional round cap
//!
//! Both types deserialize with `#[serde(default)]`, so a partial document
//! only overrides the fields it names.

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Starting values for a freshly created participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantDefaults {
    /// Primary health at match start.
    pub hp: i64,
    /// Primary health cap.
    pub max_hp: i64,
    /// Resource pool at match start.
    pub mp: i64,
    /// Reanimated pool health, restored on every reanimation.
    pub second_hp: i64,
    /// Reanimated pool cap, restored on every reanimation.
    pub second_max_hp: i64,
    /// Cap that a max-health raise sets the active pool to.
    pub raised_max_hp: i64,
}

impl Default for ParticipantDefaults {
    fn default() -> Self {
        Self {
            hp: 2,
            max_hp: 4,
            mp: 100,
            second_hp: 2,
            second_max_hp: 4,
            raised_max_hp: 6,
        }
    }
}

/// Configuration for a single match.
///
/// ```
/// use skill_clash::core::MatchConfig;
///
/// let config = MatchConfig::new(3).with_starting_mp(5).with_max_rounds(50);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.defaults.mp, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of participants (2-255).
    pub player_count: usize,

    /// Starting pools.
    pub defaults: ParticipantDefaults,

    /// Abort with `RoundLimitReached` after this many rounds. `None` runs
    /// until the match terminates on its own.
    pub max_rounds: Option<u32>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_count: 3,
            defaults: ParticipantDefaults::default(),
            max_rounds: None,
        }
    }
}

impl MatchConfig {
    /// Create a configuration for `player_count` participants with default pools.
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Override the starting resource pool.
    #[must_use]
    pub fn with_starting_mp(mut self, mp: i64) -> Self {
        self.defaults.mp = mp;
        self
    }

    /// Override the starting primary health and cap.
    #[must_use]
    pub fn with_health(mut self, hp: i64, max_hp: i64) -> Self {
        self.defaults.hp = hp;
        self.defaults.max_hp = max_hp;
        self
    }

    /// Cap the number of rounds `Match::run` will play.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(2..=255).contains(&self.player_count) {
            return Err(EngineError::InvalidConfig(format!(
                "player_count must be 2-255, got {}",
                self.player_count
            )));
        }

        let d = &self.defaults;
        if d.hp <= 0 || d.second_hp <= 0 {
            return Err(EngineError::InvalidConfig(
                "starting health pools must be positive".to_string(),
            ));
        }
        if d.hp > d.max_hp || d.second_hp > d.second_max_hp {
            return Err(EngineError::InvalidConfig(
                "starting health exceeds its cap".to_string(),
            ));
        }
        if d.mp < 0 {
            return Err(EngineError::InvalidConfig(
                "starting mp cannot be negative".to_string(),
            ));
        }
        if self.max_rounds == Some(0) {
            return Err(EngineError::InvalidConfig(
                "max_rounds must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

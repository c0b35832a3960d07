//! Engine configuration.
//!
//! Match length, starting balance and the fixed payoff of special events.
//! Static content (tiles, questions, challenge rules) is not configuration;
//! it lives in [`crate::tables::GameTables`].

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};
use crate::error::ConfigError;

/// Complete engine configuration.
///
/// Missing fields take their defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Turns each player takes. The match lasts twice this many turns.
    pub max_turns_per_player: u32,

    /// Coins each player starts with.
    pub starting_coins: u32,

    /// Coin change when a special event is resolved successfully.
    pub special_success_reward: i32,

    /// Coin change when a special event is failed.
    pub special_failure_penalty: i32,

    /// Probability that a `special_event` rule fires. Its `trigger` is ignored.
    pub special_event_chance: f64,

    /// Run phases that need no input as part of the action that reached
    /// them. When false, the caller steps them with `TurnEngine::advance`.
    pub auto_advance: bool,

    /// Display token per player.
    pub player_colors: PlayerMap<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_turns_per_player: 10,
            starting_coins: 100,
            special_success_reward: 20,
            special_failure_penalty: -10,
            special_event_chance: 0.10,
            auto_advance: true,
            player_colors: PlayerMap::new(|p| match p {
                PlayerId::Player1 => "#4CAF50".to_string(),
                PlayerId::Player2 => "#03A9F4".to_string(),
            }),
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of turns per player.
    #[must_use]
    pub fn with_max_turns_per_player(mut self, turns: u32) -> Self {
        self.max_turns_per_player = turns;
        self
    }

    /// Set the starting coin balance.
    #[must_use]
    pub fn with_starting_coins(mut self, coins: u32) -> Self {
        self.starting_coins = coins;
        self
    }

    /// Set the special event payoff.
    #[must_use]
    pub fn with_special_payoff(mut self, success: i32, failure: i32) -> Self {
        self.special_success_reward = success;
        self.special_failure_penalty = failure;
        self
    }

    /// Set the special event probability.
    #[must_use]
    pub fn with_special_event_chance(mut self, chance: f64) -> Self {
        self.special_event_chance = chance;
        self
    }

    /// Enable or disable automatic phase advancement.
    #[must_use]
    pub fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    /// Set a player's display color.
    #[must_use]
    pub fn with_player_color(mut self, player: PlayerId, color: impl Into<String>) -> Self {
        self.player_colors[player] = color.into();
        self
    }

    /// Total turns in a match (both players).
    #[must_use]
    pub fn total_turns(&self) -> u32 {
        self.max_turns_per_player.saturating_mul(2)
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_turns_per_player == 0 {
            return Err(ConfigError::NoTurns);
        }
        if !(0.0..=1.0).contains(&self.special_event_chance) {
            return Err(ConfigError::InvalidSpecialEventChance(self.special_event_chance));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_turns_per_player, 10);
        assert_eq!(config.total_turns(), 20);
        assert_eq!(config.starting_coins, 100);
        assert_eq!(config.special_success_reward, 20);
        assert_eq!(config.special_failure_penalty, -10);
        assert!(config.auto_advance);
        assert_eq!(config.player_colors[PlayerId::Player1], "#4CAF50");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_max_turns_per_player(3)
            .with_starting_coins(50)
            .with_special_payoff(30, -5)
            .with_auto_advance(false)
            .with_player_color(PlayerId::Player2, "teal");

        assert_eq!(config.total_turns(), 6);
        assert_eq!(config.starting_coins, 50);
        assert_eq!(config.special_success_reward, 30);
        assert_eq!(config.special_failure_penalty, -5);
        assert!(!config.auto_advance);
        assert_eq!(config.player_colors[PlayerId::Player2], "teal");
    }

    #[test]
    fn test_validate() {
        let zero_turns = EngineConfig::new().with_max_turns_per_player(0);
        assert!(matches!(zero_turns.validate(), Err(ConfigError::NoTurns)));

        let bad_chance = EngineConfig::new().with_special_event_chance(1.5);
        assert!(matches!(
            bad_chance.validate(),
            Err(ConfigError::InvalidSpecialEventChance(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"max_turns_per_player": 4}"#).unwrap();
        assert_eq!(config.max_turns_per_player, 4);
        assert_eq!(config.starting_coins, 100);
        assert!(config.auto_advance);
    }
}

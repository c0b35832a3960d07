//! Challenge rule definitions.
//!
//! Rules are static content: each pairs a condition on the acting player's
//! standing with a reward and a presentation (title, icon, description).

use serde::{Deserialize, Serialize};

use crate::core::EngineConfig;
use crate::error::ConfigError;

/// What a rule checks. See `ChallengeEvaluator` for the predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeCondition {
    /// Coins at or above the trigger.
    HighScore,
    /// Coins at or below the trigger.
    LowScore,
    /// Streak at or above the trigger.
    ConsecutiveCorrect,
    /// Turn count at or above the trigger.
    TurnNumber,
    /// Answer accuracy (percent) at or above the trigger.
    HighEfficiency,
    /// Standing on the tile named by the trigger.
    ExactPosition,
    /// Fires with probability `trigger`.
    Random,
    /// Fires with the configured special-event chance.
    SpecialEvent,
}

impl ChallengeCondition {
    /// Whether `trigger` is read as a probability.
    #[must_use]
    pub const fn is_probability(self) -> bool {
        matches!(self, ChallengeCondition::Random)
    }
}

/// How a triggered rule pays out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    /// Pays `reward` directly.
    Bonus,
    /// Pays `reward` directly (usually negative).
    Challenge,
    /// Resolved yes/no by the player; fixed payoff from the config.
    Special,
}

/// A challenge rule from the rule table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChallengeRule {
    pub condition: ChallengeCondition,
    pub trigger: f64,
    pub reward: i32,
    #[serde(rename = "type")]
    pub kind: ChallengeKind,
    pub title: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The yes/no prompt shown for a special event.
    #[serde(default, alias = "specialQuestion", skip_serializing_if = "Option::is_none")]
    pub special_question: Option<String>,
}

impl ChallengeRule {
    /// Create a rule.
    pub fn new(
        condition: ChallengeCondition,
        trigger: f64,
        reward: i32,
        kind: ChallengeKind,
        title: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            condition,
            trigger,
            reward,
            kind,
            title: title.into(),
            icon: icon.into(),
            description: None,
            special_question: None,
        }
    }

    /// Add a description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add the special-event prompt (builder pattern).
    #[must_use]
    pub fn with_special_question(mut self, question: impl Into<String>) -> Self {
        self.special_question = Some(question.into());
        self
    }

    /// Coin change when this rule is resolved.
    ///
    /// Bonus and challenge rules pay `reward` whatever the outcome. Special
    /// rules ignore `reward` and pay the configured success/failure amounts.
    #[must_use]
    pub fn payout(&self, success: bool, config: &EngineConfig) -> i32 {
        match self.kind {
            ChallengeKind::Bonus | ChallengeKind::Challenge => self.reward,
            ChallengeKind::Special if success => config.special_success_reward,
            ChallengeKind::Special => config.special_failure_penalty,
        }
    }

    /// Banner text announcing the rule to a player.
    #[must_use]
    pub fn announcement(&self, player_name: &str) -> String {
        match self.kind {
            ChallengeKind::Bonus => format!("Congratulations {player_name}! You've earned a bonus!"),
            ChallengeKind::Challenge => format!("{player_name}, you've encountered a challenge!"),
            ChallengeKind::Special => format!("Special event for {player_name}!"),
        }
    }

    /// Reject probability triggers outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.condition.is_probability() && !(0.0..=1.0).contains(&self.trigger) {
            return Err(ConfigError::InvalidProbability {
                title: self.title.clone(),
                trigger: self.trigger,
            });
        }
        Ok(())
    }
}

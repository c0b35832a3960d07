//! Match state.
//!
//! ## GameState
//!
//! The canonical state of one match: both players, turn counter, phase,
//! answer statistics, plus what the current turn has drawn so far (roll,
//! question, pending challenge). History and the game log use `im`
//! persistent vectors so a snapshot clone is O(1).
//!
//! Mutation is crate-private: only the turn engine changes a match. Callers
//! read snapshots.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::board::BoardPosition;
use super::config::EngineConfig;
use super::player::{Player, PlayerId, PlayerMap};
use crate::challenges::ChallengeRule;
use crate::error::ConfigError;
use crate::tables::Question;

/// Turn phase.
///
/// `Idle → Rolling → AwaitingAnswer → {Moving | Staying} → ChallengeCheck →
/// EventResolution → TurnAdvance → Idle`, or `→ Ended` after the last turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Rolling,
    AwaitingAnswer,
    Moving,
    Staying,
    ChallengeCheck,
    EventResolution,
    TurnAdvance,
    Ended,
}

impl Phase {
    /// Phases that wait for a player action.
    #[must_use]
    pub const fn needs_input(self) -> bool {
        matches!(self, Phase::Idle | Phase::AwaitingAnswer | Phase::ChallengeCheck)
    }

    /// Phases the engine can leave on its own.
    #[must_use]
    pub const fn is_automatic(self) -> bool {
        matches!(
            self,
            Phase::Rolling | Phase::Moving | Phase::Staying | Phase::EventResolution | Phase::TurnAdvance
        )
    }
}

/// Tone of a log line, for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Roll,
    Positive,
    Negative,
    Neutral,
}

impl LogKind {
    /// Positive for gains, negative otherwise.
    #[must_use]
    pub const fn for_delta(delta: i32) -> Self {
        if delta > 0 {
            LogKind::Positive
        } else {
            LogKind::Negative
        }
    }
}

/// One line of the game log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u32,
    pub kind: LogKind,
    pub message: String,
}

/// State of one match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub players: PlayerMap<Player>,
    pub current_player: PlayerId,
    pub turn_count: u32,
    pub max_turns_per_player: u32,
    pub phase: Phase,
    pub consecutive_correct: u32,
    pub total_correct_answers: u32,
    pub total_questions: u32,

    /// Die value for the turn in progress.
    pub last_roll: Option<u8>,
    /// Question awaiting an answer.
    pub current_question: Option<Question>,
    /// Challenge awaiting resolution.
    pub pending_challenge: Option<ChallengeRule>,

    /// Every accepted action, in order.
    pub history: Vector<ActionRecord>,
    /// Human-readable game log.
    pub log: Vector<LogEntry>,

    action_sequence: u32,
}

impl GameState {
    /// Create the state for a fresh match.
    ///
    /// Names are stored as given; the engine validates them first.
    #[must_use]
    pub fn new(player1: &str, player2: &str, config: &EngineConfig) -> Self {
        let players = PlayerMap::new(|id| {
            let name = match id {
                PlayerId::Player1 => player1,
                PlayerId::Player2 => player2,
            };
            Player::new(id, name, config.starting_coins, config.player_colors[id].clone())
        });

        Self {
            players,
            current_player: PlayerId::Player1,
            turn_count: 0,
            max_turns_per_player: config.max_turns_per_player,
            phase: Phase::Idle,
            consecutive_correct: 0,
            total_correct_answers: 0,
            total_questions: 0,
            last_roll: None,
            current_question: None,
            pending_challenge: None,
            history: Vector::new(),
            log: Vector::new(),
            action_sequence: 0,
        }
    }

    // === Queries ===

    /// A player's standing.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// Turns in the whole match.
    #[must_use]
    pub fn total_turns(&self) -> u32 {
        self.max_turns_per_player.saturating_mul(2)
    }

    /// True once the final turn has advanced.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// 1-based round number (one turn per player).
    #[must_use]
    pub fn current_round(&self) -> u32 {
        (self.turn_count / 2 + 1).min(self.max_turns_per_player.max(1))
    }

    /// Fraction of questions answered correctly; `0.0` before any question.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            f64::from(self.total_correct_answers) / f64::from(self.total_questions)
        }
    }

    /// Accuracy as a percentage, used by efficiency challenges.
    #[must_use]
    pub fn efficiency_percent(&self) -> f64 {
        f64::from(self.total_correct_answers) / f64::from(self.total_questions.max(1)) * 100.0
    }

    /// Consecutive correct answers.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.consecutive_correct
    }

    /// Check that the state is one the engine could have reached.
    ///
    /// The turn fields must match the phase, and the match ends exactly at
    /// the last turn.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let total = self.total_turns();
        if total == 0 {
            return Err(ConfigError::NoTurns);
        }
        if self.turn_count > total {
            return Err(ConfigError::InconsistentState("turn count past the last turn"));
        }
        if (self.phase == Phase::Ended) != (self.turn_count == total) {
            return Err(ConfigError::InconsistentState("match must end exactly at the last turn"));
        }

        match self.phase {
            Phase::Rolling | Phase::Moving if self.last_roll.is_none() => {
                Err(ConfigError::InconsistentState("no die roll for the turn in progress"))
            }
            Phase::AwaitingAnswer if self.current_question.is_none() => {
                Err(ConfigError::InconsistentState("awaiting an answer with no question drawn"))
            }
            Phase::AwaitingAnswer if self.last_roll.is_none() => {
                Err(ConfigError::InconsistentState("no die roll for the turn in progress"))
            }
            Phase::ChallengeCheck if self.pending_challenge.is_none() => {
                Err(ConfigError::InconsistentState("challenge check with no pending challenge"))
            }
            _ => Ok(()),
        }
    }

    // === Controlled mutation ===

    /// Apply a coin delta to a player, clamped at zero. Returns the new balance.
    pub(crate) fn apply_coins(&mut self, player: PlayerId, delta: i32) -> u32 {
        self.players[player].apply_coins(delta)
    }

    /// Move a player forward, wrapping. Returns the new position.
    pub(crate) fn move_player(&mut self, player: PlayerId, steps: u8) -> BoardPosition {
        self.players[player].advance(steps)
    }

    /// Update answer statistics.
    pub(crate) fn record_answer(&mut self, correct: bool) {
        self.total_questions += 1;
        if correct {
            self.total_correct_answers += 1;
            self.consecutive_correct += 1;
        } else {
            self.consecutive_correct = 0;
        }
    }

    /// End the current turn: count it, hand over, and end the match after
    /// the final turn.
    pub(crate) fn advance_turn(&mut self) {
        self.turn_count += 1;
        self.current_player = self.current_player.other();
        self.last_roll = None;
        self.current_question = None;
        self.pending_challenge = None;
        self.action_sequence = 0;
        self.phase = if self.turn_count >= self.total_turns() {
            Phase::Ended
        } else {
            Phase::Idle
        };
    }

    /// Record an accepted action.
    pub(crate) fn record_action(&mut self, action: Action) {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.history.push_back(ActionRecord::new(
            self.current_player,
            action,
            self.turn_count,
            sequence,
        ));
    }

    /// Append a log line.
    pub(crate) fn push_log(&mut self, kind: LogKind, message: impl Into<String>) {
        self.log.push_back(LogEntry {
            turn: self.turn_count,
            kind,
            message: message.into(),
        });
    }
}

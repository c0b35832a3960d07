//! Actions the presentation layer can issue, and the history record.
//!
//! Every action the engine accepts is appended to the match history as an
//! `ActionRecord`. Replaying the recorded actions against an engine with the
//! same seed reproduces the match exactly.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A request from the presentation layer.
///
/// ## Example
///
/// ```
/// use eco_quest::core::Action;
///
/// let actions = [
///     Action::start_match("Ada", "Grace"),
///     Action::RollDice,
///     Action::SubmitAnswer { answered_true: true },
/// ];
/// assert_eq!(actions[1].name(), "roll_dice");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    StartMatch { player1: String, player2: String },
    RollDice,
    SubmitAnswer { answered_true: bool },
    ResolveChallenge { success: bool },
    /// Step one phase that needs no input.
    Advance,
    ResetMatch,
}

impl Action {
    /// Create a start-match action.
    #[must_use]
    pub fn start_match(player1: impl Into<String>, player2: impl Into<String>) -> Self {
        Self::StartMatch {
            player1: player1.into(),
            player2: player2.into(),
        }
    }

    /// Short name, for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::StartMatch { .. } => "start_match",
            Action::RollDice => "roll_dice",
            Action::SubmitAnswer { .. } => "submit_answer",
            Action::ResolveChallenge { .. } => "resolve_challenge",
            Action::Advance => "advance",
            Action::ResetMatch => "reset_match",
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player whose turn it was.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn count when the action was applied.
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

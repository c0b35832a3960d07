//! Events emitted by the turn engine.
//!
//! Every action returns the events it produced, in order. The presentation
//! layer uses them to drive popups and animations; the engine never waits
//! on them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::challenges::ChallengeKind;
use crate::core::{BoardPosition, PlayerId};
use crate::rules::MatchResult;

/// Something that happened during an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEvent {
    MatchStarted {
        player1: String,
        player2: String,
    },
    DiceRolled {
        player: PlayerId,
        value: u8,
    },
    QuestionDrawn {
        player: PlayerId,
        question: usize,
    },
    AnswerSubmitted {
        player: PlayerId,
        correct: bool,
        streak: u32,
    },
    Moved {
        player: PlayerId,
        from: BoardPosition,
        to: BoardPosition,
        steps: u8,
    },
    Stayed {
        player: PlayerId,
        position: BoardPosition,
    },
    ChallengeTriggered {
        player: PlayerId,
        title: String,
        kind: ChallengeKind,
    },
    ChallengeResolved {
        player: PlayerId,
        title: String,
        success: bool,
        delta: i32,
        coins: u32,
    },
    TileEventApplied {
        player: PlayerId,
        tile: usize,
        effect: i32,
        coins: u32,
    },
    /// No tile at the player's position; the turn continued without it.
    TileEventSkipped {
        player: PlayerId,
        position: BoardPosition,
    },
    TurnAdvanced {
        turn_count: u32,
        next_player: PlayerId,
    },
    MatchEnded {
        result: MatchResult,
    },
    MatchReset,
}

impl GameEvent {
    /// The player the event concerns, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::DiceRolled { player, .. }
            | GameEvent::QuestionDrawn { player, .. }
            | GameEvent::AnswerSubmitted { player, .. }
            | GameEvent::Moved { player, .. }
            | GameEvent::Stayed { player, .. }
            | GameEvent::ChallengeTriggered { player, .. }
            | GameEvent::ChallengeResolved { player, .. }
            | GameEvent::TileEventApplied { player, .. }
            | GameEvent::TileEventSkipped { player, .. } => Some(*player),
            GameEvent::MatchStarted { .. }
            | GameEvent::TurnAdvanced { .. }
            | GameEvent::MatchEnded { .. }
            | GameEvent::MatchReset => None,
        }
    }
}

/// Events produced by one action. Most actions emit a handful.
pub type Events = SmallVec<[GameEvent; 4]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_player() {
        let rolled = GameEvent::DiceRolled {
            player: PlayerId::Player2,
            value: 3,
        };
        assert_eq!(rolled.player(), Some(PlayerId::Player2));
        assert_eq!(GameEvent::MatchReset.player(), None);
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::Moved {
            player: PlayerId::Player1,
            from: BoardPosition::new(10),
            to: BoardPosition::new(2),
            steps: 4,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}

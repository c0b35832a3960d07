//! Match result.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId, PlayerMap};

/// Result of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    /// Strictly more coins.
    Winner(PlayerId),
    /// Equal coins.
    Tie,
}

impl MatchResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, MatchResult::Winner(p) if *p == player)
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Winner(player) => write!(f, "{player}"),
            MatchResult::Tie => f.write_str("tie"),
        }
    }
}

/// Compare coin balances. Position and streak do not count.
#[must_use]
pub fn resolve_winner(state: &GameState) -> MatchResult {
    let p1 = state.player(PlayerId::Player1).eco_coins;
    let p2 = state.player(PlayerId::Player2).eco_coins;

    match p1.cmp(&p2) {
        std::cmp::Ordering::Greater => MatchResult::Winner(PlayerId::Player1),
        std::cmp::Ordering::Less => MatchResult::Winner(PlayerId::Player2),
        std::cmp::Ordering::Equal => MatchResult::Tie,
    }
}

/// Rank earned with a final balance.
///
/// Winners and non-winners have separate ladders. In a tie nobody won.
#[must_use]
pub fn rank_title(coins: u32, won: bool) -> &'static str {
    if won {
        match coins {
            200.. => "Eco Genius",
            150..=199 => "Environmental Champion",
            100..=149 => "Space Farmer",
            50..=99 => "Crop Master",
            _ => "Green Thumb",
        }
    } else {
        match coins {
            100.. => "Still Learning",
            50..=99 => "Growing Strong",
            25..=49 => "On the Path",
            _ => "Future Farmer",
        }
    }
}

/// Rank titles for both players at the current balances.
#[must_use]
pub fn final_titles(state: &GameState) -> PlayerMap<&'static str> {
    let result = resolve_winner(state);
    PlayerMap::new(|id| rank_title(state.player(id).eco_coins, result.is_winner(id)))
}

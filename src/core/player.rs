//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! The game is strictly two-player, so the identifier is a closed enum
//! rather than an index. `PlayerId::other` gives the opponent.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::board::{clamp_coins, BoardPosition};

/// Player identifier.
///
/// Serializes as `"player1"` / `"player2"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerId {
    Player1,
    Player2,
}

impl PlayerId {
    /// Both players in turn order.
    pub const ALL: [PlayerId; 2] = [PlayerId::Player1, PlayerId::Player2];

    /// Get the slot index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerId::Player1 => 0,
            PlayerId::Player2 => 1,
        }
    }

    /// The opposing player.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    /// Iterate over both players in turn order.
    ///
    /// ```
    /// use eco_quest::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(players, vec![PlayerId::Player1, PlayerId::Player2]);
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        Self::ALL.into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::Player1 => f.write_str("player1"),
            PlayerId::Player2 => f.write_str("player2"),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use eco_quest::core::{PlayerId, PlayerMap};
///
/// let mut coins: PlayerMap<u32> = PlayerMap::with_value(100);
/// coins[PlayerId::Player2] = 80;
///
/// assert_eq!(coins[PlayerId::Player1], 100);
/// assert_eq!(coins[PlayerId::Player2], 80);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::ALL.map(factory),
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// A player's standing in the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub eco_coins: u32,
    pub position: BoardPosition,
    /// Opaque display token, passed through to the presentation layer.
    pub color: String,
}

impl Player {
    /// Create a player on the start tile.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, eco_coins: u32, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            eco_coins,
            position: BoardPosition::START,
            color: color.into(),
        }
    }

    /// Apply a signed coin delta, clamping at zero. Returns the new balance.
    pub fn apply_coins(&mut self, delta: i32) -> u32 {
        self.eco_coins = clamp_coins(self.eco_coins, delta);
        self.eco_coins
    }

    /// Move forward `steps` tiles, wrapping around the board.
    pub fn advance(&mut self, steps: u8) -> BoardPosition {
        self.position = self.position.advance(steps);
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::Player1.index(), 0);
        assert_eq!(PlayerId::Player2.index(), 1);
        assert_eq!(PlayerId::Player1.other(), PlayerId::Player2);
        assert_eq!(PlayerId::Player2.other(), PlayerId::Player1);
        assert_eq!(format!("{}", PlayerId::Player1), "player1");
    }

    #[test]
    fn test_player_id_serde() {
        let json = serde_json::to_string(&PlayerId::Player2).unwrap();
        assert_eq!(json, "\"player2\"");
        let back: PlayerId = serde_json::from_str("\"player1\"").unwrap();
        assert_eq!(back, PlayerId::Player1);
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<usize> = PlayerMap::new(|p| p.index() * 10);
        assert_eq!(map[PlayerId::Player1], 0);
        assert_eq!(map[PlayerId::Player2], 10);
    }

    #[test]
    fn test_player_map_mutation_and_iter() {
        let mut map: PlayerMap<i32> = PlayerMap::with_value(0);
        map[PlayerId::Player2] = 7;
        for (_, value) in map.iter_mut() {
            *value += 1;
        }

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::Player1, &1), (PlayerId::Player2, &8)]);
    }

    #[test]
    fn test_player_coins_clamp() {
        let mut player = Player::new(PlayerId::Player1, "Ada", 10, "#4CAF50");
        assert_eq!(player.apply_coins(-25), 0);
        assert_eq!(player.apply_coins(5), 5);
    }

    #[test]
    fn test_player_advance_wraps() {
        let mut player = Player::new(PlayerId::Player1, "Ada", 100, "#4CAF50");
        player.position = BoardPosition::new(10);
        assert_eq!(player.advance(4), BoardPosition::new(2));
    }
}

//! Board geometry and coin arithmetic.
//!
//! The board is a ring of `BOARD_SIZE` tiles. Positions are only ever
//! produced by wrapping, so a `BoardPosition` is always a valid tile index.

use serde::{Deserialize, Serialize};

/// Number of tiles on the board.
pub const BOARD_SIZE: u8 = 12;

/// Number of faces on the die.
pub const DIE_FACES: u8 = 6;

/// A tile index in `[0, BOARD_SIZE)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BoardPosition(u8);

impl BoardPosition {
    /// The start tile.
    pub const START: Self = Self(0);

    /// Create a position, wrapping `index` onto the board.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self((index % BOARD_SIZE as usize) as u8)
    }

    /// Get the tile index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Move forward `steps` tiles. There is no overshoot: the ring wraps.
    ///
    /// ```
    /// use eco_quest::core::BoardPosition;
    ///
    /// assert_eq!(BoardPosition::new(10).advance(4), BoardPosition::new(2));
    /// ```
    #[must_use]
    pub const fn advance(self, steps: u8) -> Self {
        Self(((self.0 as u16 + steps as u16) % BOARD_SIZE as u16) as u8)
    }
}

impl TryFrom<u8> for BoardPosition {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < BOARD_SIZE {
            Ok(Self(value))
        } else {
            Err(format!("board position {value} is off the board"))
        }
    }
}

impl From<BoardPosition> for u8 {
    fn from(position: BoardPosition) -> Self {
        position.0
    }
}

impl std::fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Apply a signed delta to a coin balance, clamping at zero.
///
/// There is no upper clamp; a balance past `u32::MAX` saturates.
#[must_use]
pub fn clamp_coins(coins: u32, delta: i32) -> u32 {
    let total = i64::from(coins) + i64::from(delta);
    u32::try_from(total.max(0)).unwrap_or(u32::MAX)
}

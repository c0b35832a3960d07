//! Board tiles and the tile table.

use serde::{Deserialize, Serialize};

use crate::core::{BoardPosition, BOARD_SIZE};
use crate::error::ConfigError;

/// One board tile and the coin event it carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Board index. Assigned from table order on load.
    #[serde(default)]
    pub index: usize,
    pub title: String,
    pub icon: String,
    /// Signed coin delta applied when a player lands here.
    pub effect: i32,
    pub fact: String,
    /// Optional flavour text shown with the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Tile {
    /// Create a tile. The index is fixed when it is placed in a `TileTable`.
    pub fn new(title: impl Into<String>, icon: impl Into<String>, effect: i32, fact: impl Into<String>) -> Self {
        Self {
            index: 0,
            title: title.into(),
            icon: icon.into(),
            effect,
            fact: fact.into(),
            message: None,
        }
    }

    /// Add flavour text (builder pattern).
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// True if landing here gains coins.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.effect > 0
    }
}

/// Exactly `BOARD_SIZE` tiles, indexed by board position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileTable {
    tiles: Vec<Tile>,
}

impl TileTable {
    /// Build the table, rejecting anything but exactly `BOARD_SIZE` tiles.
    pub fn new(tiles: Vec<Tile>) -> Result<Self, ConfigError> {
        let expected = usize::from(BOARD_SIZE);
        if tiles.len() != expected {
            return Err(ConfigError::TileCount {
                expected,
                found: tiles.len(),
            });
        }

        let tiles = tiles
            .into_iter()
            .enumerate()
            .map(|(index, tile)| Tile { index, ..tile })
            .collect();

        Ok(Self { tiles })
    }

    /// The tile at a board position.
    #[must_use]
    pub fn get(&self, position: BoardPosition) -> Option<&Tile> {
        self.tiles.get(position.index())
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a constructed table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate tiles in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

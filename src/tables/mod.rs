//! Static content tables: tiles, questions, challenge rules.
//!
//! Tables are loaded once, validated, and never mutated. The crate embeds a
//! default set under `data/`; callers can supply their own JSON in the same
//! shape.
//!
//! ## Example
//!
//! ```
//! use eco_quest::tables::GameTables;
//!
//! let tables = GameTables::builtin().unwrap();
//! assert_eq!(tables.tiles.len(), 12);
//! assert!(!tables.questions.is_empty());
//! ```

mod question;
mod tile;

pub use question::{Question, QuestionPool};
pub use tile::{Tile, TileTable};

use serde::de::DeserializeOwned;

use crate::challenges::ChallengeRule;
use crate::error::ConfigError;

const BUILTIN_TILES: &str = include_str!("../../data/tiles.json");
const BUILTIN_QUESTIONS: &str = include_str!("../../data/questions.json");
const BUILTIN_CHALLENGES: &str = include_str!("../../data/challenges.json");

/// All static content an engine needs.
#[derive(Clone, Debug, PartialEq)]
pub struct GameTables {
    pub tiles: TileTable,
    pub questions: QuestionPool,
    pub challenges: Vec<ChallengeRule>,
}

impl GameTables {
    /// Validate and assemble the tables.
    pub fn new(
        tiles: Vec<Tile>,
        questions: Vec<Question>,
        challenges: Vec<ChallengeRule>,
    ) -> Result<Self, ConfigError> {
        let tiles = TileTable::new(tiles)?;
        let questions = QuestionPool::new(questions)?;
        challenges.iter().try_for_each(ChallengeRule::validate)?;

        log::debug!(
            "loaded {} tiles, {} questions, {} challenge rules",
            tiles.len(),
            questions.len(),
            challenges.len()
        );

        Ok(Self {
            tiles,
            questions,
            challenges,
        })
    }

    /// Parse the three tables from JSON arrays.
    pub fn from_json(tiles: &str, questions: &str, challenges: &str) -> Result<Self, ConfigError> {
        Self::new(
            parse("tile", tiles)?,
            parse("question", questions)?,
            parse("challenge", challenges)?,
        )
    }

    /// The tables embedded in the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(BUILTIN_TILES, BUILTIN_QUESTIONS, BUILTIN_CHALLENGES)
    }

    /// Replace the challenge rules (builder pattern).
    pub fn with_challenges(mut self, challenges: Vec<ChallengeRule>) -> Result<Self, ConfigError> {
        challenges.iter().try_for_each(ChallengeRule::validate)?;
        self.challenges = challenges;
        Ok(self)
    }
}

fn parse<T: DeserializeOwned>(table: &'static str, json: &str) -> Result<Vec<T>, ConfigError> {
    serde_json::from_str(json).map_err(|source| ConfigError::Parse { table, source })
}

//! # eco-quest
//!
//! Turn engine and coin economy for a two-player trivia board game.
//!
//! Two players take turns on a 12-tile board. Each turn a player rolls a
//! die, answers a true/false question, and moves only if the answer is
//! right. Landing on a tile applies its coin effect; rule-triggered
//! challenges can pay out first. After a fixed number of turns the player
//! with more coins wins.
//!
//! ## Design
//!
//! - **Phase-guarded actions**: Actions issued in the wrong phase are
//!   ignored, never errors.
//!
//! - **Injectable randomness**: Die rolls, question draws and probability
//!   triggers all go through [`RandomSource`]. Seeded runs replay exactly.
//!
//! - **Cheap snapshots**: History and log use `im` vectors, so cloning the
//!   state is O(1).
//!
//! ## Modules
//!
//! - `core`: Players, board, state, actions, RNG, configuration
//! - `tables`: Tiles, questions and challenge rules
//! - `challenges`: Challenge conditions and evaluation
//! - `rules`: Win resolution
//! - `engine`: The turn engine and its events

pub mod challenges;
pub mod core;
pub mod engine;
pub mod error;
pub mod rules;
pub mod tables;

pub use crate::core::{
    Action, ActionRecord, BoardPosition, EngineConfig, GameRng, GameRngState, GameState, LogEntry, LogKind,
    Phase, Player, PlayerId, PlayerMap, RandomSource, ScriptedRng,
};

pub use crate::challenges::{ChallengeCondition, ChallengeEvaluator, ChallengeKind, ChallengeRule, ConditionContext};

pub use crate::engine::{Events, GameEvent, TurnEngine};

pub use crate::error::{ConfigError, MatchError};

pub use crate::rules::{final_titles, rank_title, resolve_winner, MatchResult};

pub use crate::tables::{GameTables, Question, QuestionPool, Tile, TileTable};

//! Core engine types: players, board, state, actions, RNG, configuration.
//!
//! Everything the turn engine mutates lives here. The types carry their
//! invariants (coins never negative, positions always on the board) so the
//! engine cannot break them by accident.

pub mod action;
pub mod board;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use board::{clamp_coins, BoardPosition, BOARD_SIZE, DIE_FACES};
pub use config::EngineConfig;
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRng};
pub use state::{GameState, LogEntry, LogKind, Phase};

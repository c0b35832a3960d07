//! Error types.
//!
//! Configuration problems are fatal: no engine is built from a broken
//! table or config. Match errors are reported to the caller and leave the
//! engine untouched. Actions issued in the wrong phase are not errors at
//! all; the engine ignores them.

use thiserror::Error;

use crate::core::PlayerId;

/// Malformed static tables or engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tile table must have exactly {expected} entries, found {found}")]
    TileCount { expected: usize, found: usize },

    #[error("question pool is empty")]
    EmptyQuestionPool,

    #[error("challenge \"{title}\": probability trigger {trigger} is outside [0, 1]")]
    InvalidProbability { title: String, trigger: f64 },

    #[error("special event chance {0} is outside [0, 1]")]
    InvalidSpecialEventChance(f64),

    #[error("max turns per player must be at least 1")]
    NoTurns,

    #[error("inconsistent match state: {0}")]
    InconsistentState(&'static str),

    #[error("failed to parse {table} table: {source}")]
    Parse {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Rejected match-level requests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("name for {0} must not be blank")]
    BlankName(PlayerId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ConfigError::TileCount { expected: 12, found: 11 };
        assert_eq!(err.to_string(), "tile table must have exactly 12 entries, found 11");

        let err = ConfigError::InconsistentState("turn count past the last turn");
        assert_eq!(err.to_string(), "inconsistent match state: turn count past the last turn");

        let err = MatchError::BlankName(PlayerId::Player2);
        assert_eq!(err.to_string(), "name for player2 must not be blank");
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let source = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err = ConfigError::Parse { table: "tile", source };
        assert!(err.to_string().starts_with("failed to parse tile table"));
        assert!(std::error::Error::source(&err).is_some());
    }
}

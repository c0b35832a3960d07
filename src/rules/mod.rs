//! Win resolution.
//!
//! The winner is decided by coins alone: strictly more coins wins, equal
//! coins is a tie. Final balances also earn a rank title.

pub mod winner;

pub use winner::{final_titles, rank_title, resolve_winner, MatchResult};

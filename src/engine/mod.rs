//! The turn engine.
//!
//! [`TurnEngine`] owns the match state, the static tables and a random
//! source. The presentation layer calls one action per user input and
//! renders the [`GameEvent`]s it returns.
//!
//! ## Turn Flow
//!
//! ```text
//! Idle -> Rolling -> AwaitingAnswer -+-> Moving -+-> ChallengeCheck -+-> TurnAdvance
//!                                    |           |                   '-> EventResolution
//!                                    |           '-> EventResolution -> TurnAdvance
//!                                    '-> Staying -> TurnAdvance
//! TurnAdvance -> Idle | Ended
//! ```

mod event;
mod turn;

pub use event::{Events, GameEvent};
pub use turn::TurnEngine;

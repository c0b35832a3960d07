//! Rule-triggered challenges.
//!
//! After a player moves, every configured rule is checked against their
//! standing. At most one challenge surfaces per turn.
//!
//! ## Key Components
//!
//! - [`ChallengeRule`]: A rule from the static rule table
//! - [`ChallengeCondition`]: What the rule checks
//! - [`ChallengeKind`]: How the rule pays out
//! - [`ChallengeEvaluator`]: Picks at most one triggered rule
//!
//! ## Example Usage
//!
//! ```
//! use eco_quest::challenges::{
//!     ChallengeCondition, ChallengeEvaluator, ChallengeKind, ChallengeRule, ConditionContext,
//! };
//! use eco_quest::core::{EngineConfig, GameRng, GameState, PlayerId};
//!
//! let rules = vec![ChallengeRule::new(
//!     ChallengeCondition::HighScore, 100.0, 25, ChallengeKind::Bonus, "Green Thumb", "🌱",
//! )];
//!
//! let state = GameState::new("Ada", "Grace", &EngineConfig::default());
//! let ctx = ConditionContext::new(&state, PlayerId::Player1);
//! let picked = ChallengeEvaluator::evaluate(&rules, &ctx, &mut GameRng::new(42));
//! assert_eq!(picked.map(|r| r.title.as_str()), Some("Green Thumb"));
//! ```

mod condition;
mod rule;

pub use condition::{ChallengeEvaluator, ConditionContext};
pub use rule::{ChallengeCondition, ChallengeKind, ChallengeRule};

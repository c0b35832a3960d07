//! Challenge condition evaluation.
//!
//! Each condition kind maps to one predicate over the acting player's
//! standing. Probability conditions draw from the injected random source
//! in rule order, so evaluation is reproducible under a fixed seed.

use crate::core::{GameState, Player, PlayerId, RandomSource};

use super::rule::{ChallengeCondition, ChallengeRule};

/// Context for evaluating challenge conditions.
pub struct ConditionContext<'a> {
    /// Current match state.
    pub state: &'a GameState,
    /// The acting player.
    pub player: &'a Player,
    /// Probability used by `special_event` rules.
    pub special_event_chance: f64,
}

impl<'a> ConditionContext<'a> {
    /// Default special-event probability.
    pub const DEFAULT_SPECIAL_EVENT_CHANCE: f64 = 0.10;

    /// Create a context for `player` in `state`.
    pub fn new(state: &'a GameState, player: PlayerId) -> Self {
        Self {
            state,
            player: state.player(player),
            special_event_chance: Self::DEFAULT_SPECIAL_EVENT_CHANCE,
        }
    }

    /// Override the special-event probability.
    #[must_use]
    pub fn with_special_event_chance(mut self, chance: f64) -> Self {
        self.special_event_chance = chance;
        self
    }
}

/// Evaluator for challenge rules.
pub struct ChallengeEvaluator;

impl ChallengeEvaluator {
    /// Check if a rule's condition holds.
    pub fn holds<R: RandomSource>(rule: &ChallengeRule, ctx: &ConditionContext, rng: &mut R) -> bool {
        let trigger = rule.trigger;
        match rule.condition {
            ChallengeCondition::HighScore => f64::from(ctx.player.eco_coins) >= trigger,

            ChallengeCondition::LowScore => f64::from(ctx.player.eco_coins) <= trigger,

            ChallengeCondition::ConsecutiveCorrect => f64::from(ctx.state.consecutive_correct) >= trigger,

            ChallengeCondition::TurnNumber => f64::from(ctx.state.turn_count) >= trigger,

            ChallengeCondition::HighEfficiency => ctx.state.efficiency_percent() >= trigger,

            ChallengeCondition::ExactPosition => {
                let index = ctx.player.position.index() as f64;
                (index - trigger).abs() < f64::EPSILON
            }

            ChallengeCondition::Random => rng.chance(trigger),

            // The rule's trigger is ignored.
            ChallengeCondition::SpecialEvent => rng.chance(ctx.special_event_chance),
        }
    }

    /// All rules whose condition holds, in table order.
    pub fn satisfied<'r, R: RandomSource>(
        rules: &'r [ChallengeRule],
        ctx: &ConditionContext,
        rng: &mut R,
    ) -> Vec<&'r ChallengeRule> {
        rules.iter().filter(|rule| Self::holds(rule, ctx, rng)).collect()
    }

    /// Pick at most one triggered challenge.
    ///
    /// When several rules hold, one is chosen uniformly at random and the
    /// rest are discarded for this turn. Returns `None` if none hold.
    pub fn evaluate<'r, R: RandomSource>(
        rules: &'r [ChallengeRule],
        ctx: &ConditionContext,
        rng: &mut R,
    ) -> Option<&'r ChallengeRule> {
        let candidates = Self::satisfied(rules, ctx, rng);
        match candidates.len() {
            0 => None,
            1 => Some(candidates[0]),
            n => {
                let picked = rng.pick_index(n).unwrap_or(0);
                candidates.get(picked).or(candidates.first()).copied()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenges::ChallengeKind;
    use crate::core::{BoardPosition, EngineConfig, GameRng, ScriptedRng};

    fn test_state() -> GameState {
        GameState::new("Ada", "Grace", &EngineConfig::default())
    }

    fn rule(condition: ChallengeCondition, trigger: f64) -> ChallengeRule {
        ChallengeRule::new(condition, trigger, 10, ChallengeKind::Bonus, format!("{condition:?}"), "*")
    }

    fn holds(rule: &ChallengeRule, state: &GameState) -> bool {
        let ctx = ConditionContext::new(state, PlayerId::Player1);
        ChallengeEvaluator::holds(rule, &ctx, &mut GameRng::new(0))
    }

    #[test]
    fn test_score_conditions() {
        let mut state = test_state();
        assert!(holds(&rule(ChallengeCondition::HighScore, 100.0), &state));
        assert!(!holds(&rule(ChallengeCondition::HighScore, 101.0), &state));

        state.apply_coins(PlayerId::Player1, -70);
        assert!(holds(&rule(ChallengeCondition::LowScore, 30.0), &state));
        assert!(!holds(&rule(ChallengeCondition::LowScore, 29.0), &state));
    }

    #[test]
    fn test_score_uses_acting_player() {
        let mut state = test_state();
        state.apply_coins(PlayerId::Player2, 200);

        let rich = rule(ChallengeCondition::HighScore, 250.0);
        let mut rng = GameRng::new(0);
        assert!(!ChallengeEvaluator::holds(&rich, &ConditionContext::new(&state, PlayerId::Player1), &mut rng));
        assert!(ChallengeEvaluator::holds(&rich, &ConditionContext::new(&state, PlayerId::Player2), &mut rng));
    }

    #[test]
    fn test_streak_and_turn_conditions() {
        let mut state = test_state();
        let streak = rule(ChallengeCondition::ConsecutiveCorrect, 2.0);
        state.record_answer(true);
        assert!(!holds(&streak, &state));
        state.record_answer(true);
        assert!(holds(&streak, &state));

        let late = rule(ChallengeCondition::TurnNumber, 2.0);
        assert!(!holds(&late, &state));
        state.advance_turn();
        state.advance_turn();
        assert!(holds(&late, &state));
    }

    #[test]
    fn test_efficiency_condition() {
        let mut state = test_state();
        let efficient = rule(ChallengeCondition::HighEfficiency, 80.0);

        // No questions yet: 0%.
        assert!(!holds(&efficient, &state));

        for correct in [true, true, true, true, false] {
            state.record_answer(correct);
        }
        assert!(holds(&efficient, &state));

        state.record_answer(false);
        assert!(!holds(&efficient, &state));
    }

    #[test]
    fn test_exact_position_condition() {
        let mut state = test_state();
        let spot = rule(ChallengeCondition::ExactPosition, 6.0);
        assert!(!holds(&spot, &state));

        state.players[PlayerId::Player1].position = BoardPosition::new(6);
        assert!(holds(&spot, &state));
    }

    #[test]
    fn test_random_condition_uses_trigger() {
        let state = test_state();
        let ctx = ConditionContext::new(&state, PlayerId::Player1);
        let lucky = rule(ChallengeCondition::Random, 0.3);

        let mut rng = ScriptedRng::new(0).with_units([0.29, 0.3, 0.9]);
        assert!(ChallengeEvaluator::holds(&lucky, &ctx, &mut rng));
        assert!(!ChallengeEvaluator::holds(&lucky, &ctx, &mut rng));
        assert!(!ChallengeEvaluator::holds(&lucky, &ctx, &mut rng));
    }

    #[test]
    fn test_special_event_ignores_trigger() {
        let state = test_state();
        let ctx = ConditionContext::new(&state, PlayerId::Player1);
        let special = rule(ChallengeCondition::SpecialEvent, 1.0);

        let mut rng = ScriptedRng::new(0).with_units([0.05, 0.5]);
        assert!(ChallengeEvaluator::holds(&special, &ctx, &mut rng));
        assert!(!ChallengeEvaluator::holds(&special, &ctx, &mut rng));

        let always = ConditionContext::new(&state, PlayerId::Player1).with_special_event_chance(1.0);
        assert!(ChallengeEvaluator::holds(&special, &always, &mut rng));
    }

    #[test]
    fn test_evaluate_none_when_nothing_holds() {
        let state = test_state();
        let ctx = ConditionContext::new(&state, PlayerId::Player1);
        let rules = vec![
            rule(ChallengeCondition::HighScore, 500.0),
            rule(ChallengeCondition::LowScore, 10.0),
            rule(ChallengeCondition::Random, 0.0),
        ];

        let mut rng = GameRng::new(42);
        for _ in 0..20 {
            assert!(ChallengeEvaluator::evaluate(&rules, &ctx, &mut rng).is_none());
        }
        assert!(ChallengeEvaluator::evaluate(&[], &ctx, &mut rng).is_none());
    }

    #[test]
    fn test_evaluate_single_match() {
        let state = test_state();
        let ctx = ConditionContext::new(&state, PlayerId::Player1);
        let rules = vec![
            rule(ChallengeCondition::HighScore, 500.0),
            rule(ChallengeCondition::HighScore, 50.0),
        ];

        let picked = ChallengeEvaluator::evaluate(&rules, &ctx, &mut GameRng::new(1)).unwrap();
        assert!((picked.trigger - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_evaluate_tie_break_picks_from_satisfied() {
        let state = test_state();
        let ctx = ConditionContext::new(&state, PlayerId::Player1);
        let rules = vec![
            rule(ChallengeCondition::HighScore, 50.0),
            rule(ChallengeCondition::LowScore, 10.0),
            rule(ChallengeCondition::HighScore, 100.0),
        ];

        // Satisfied: rules[0] and rules[2]; the pick indexes into that set.
        let mut rng = ScriptedRng::new(0).with_picks([1]);
        let picked = ChallengeEvaluator::evaluate(&rules, &ctx, &mut rng).unwrap();
        assert!((picked.trigger - 100.0).abs() < f64::EPSILON);
    }

    /// A source that ignores the requested range.
    struct Unbounded;

    impl RandomSource for Unbounded {
        fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
            range.end + 1
        }

        fn gen_unit(&mut self) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_tie_break_out_of_range_pick_takes_first() {
        let state = test_state();
        let ctx = ConditionContext::new(&state, PlayerId::Player1);
        let rules = vec![
            rule(ChallengeCondition::HighScore, 50.0),
            rule(ChallengeCondition::HighScore, 100.0),
        ];

        let picked = ChallengeEvaluator::evaluate(&rules, &ctx, &mut Unbounded).unwrap();
        assert!((picked.trigger - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tie_break_is_roughly_uniform() {
        let state = test_state();
        let ctx = ConditionContext::new(&state, PlayerId::Player1);
        let rules = vec![
            rule(ChallengeCondition::HighScore, 10.0),
            rule(ChallengeCondition::HighScore, 20.0),
        ];

        let mut rng = GameRng::new(99);
        let first = (0..1000)
            .filter(|_| {
                let picked = ChallengeEvaluator::evaluate(&rules, &ctx, &mut rng).unwrap();
                (picked.trigger - 10.0).abs() < f64::EPSILON
            })
            .count();
        assert!((400..=600).contains(&first), "first rule picked {first} times");
    }
}

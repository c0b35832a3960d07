//! The turn engine: phase state machine and coin economy.
//!
//! Actions are phase-guarded. An action issued in the wrong phase (or with
//! no match in progress) is ignored and returns no events, so duplicate or
//! stale calls from the presentation layer are harmless.
//!
//! Phases that need no input (`Rolling`, `Moving`, `Staying`,
//! `EventResolution`, `TurnAdvance`) are left by `step`. With
//! `auto_advance` on, every action steps until the next phase that needs
//! input; otherwise the caller paces them with [`TurnEngine::advance`].
//! Either way the same inputs produce the same match.

use crate::challenges::{ChallengeEvaluator, ChallengeKind, ChallengeRule, ConditionContext};
use crate::core::{
    Action, ActionRecord, EngineConfig, GameRng, GameState, LogEntry, LogKind, Phase, PlayerId, PlayerMap,
    RandomSource,
};
use crate::error::{ConfigError, MatchError};
use crate::rules::{final_titles, resolve_winner, MatchResult};
use crate::tables::{GameTables, Question};

use super::event::{Events, GameEvent};

/// Owns one match and sequences its turns.
///
/// ## Example
///
/// ```
/// use eco_quest::core::{EngineConfig, Phase};
/// use eco_quest::engine::TurnEngine;
/// use eco_quest::tables::GameTables;
///
/// let tables = GameTables::builtin().unwrap();
/// let mut engine = TurnEngine::seeded(tables, EngineConfig::default(), 42).unwrap();
///
/// engine.start_match("Ada", "Grace").unwrap();
/// engine.roll_dice();
/// assert_eq!(engine.phase(), Some(Phase::AwaitingAnswer));
///
/// let answer = engine.current_question().unwrap().answer;
/// engine.submit_answer(answer);
/// if engine.pending_challenge().is_some() {
///     engine.resolve_challenge(true);
/// }
/// assert_eq!(engine.state().unwrap().turn_count, 1);
/// ```
#[derive(Clone, Debug)]
pub struct TurnEngine<R: RandomSource = GameRng> {
    tables: GameTables,
    config: EngineConfig,
    rng: R,
    state: Option<GameState>,
}

impl TurnEngine<GameRng> {
    /// Create an engine with a seeded ChaCha8 source.
    pub fn seeded(tables: GameTables, config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(tables, config, GameRng::new(seed))
    }
}

impl<R: RandomSource> TurnEngine<R> {
    /// Create an engine with no match in progress.
    pub fn new(tables: GameTables, config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tables,
            config,
            rng,
            state: None,
        })
    }

    /// Create an engine that continues from a snapshot.
    ///
    /// The snapshot must be a state the engine could have reached; see
    /// [`GameState::validate`].
    pub fn resume(tables: GameTables, config: EngineConfig, rng: R, state: GameState) -> Result<Self, ConfigError> {
        state.validate()?;
        let mut engine = Self::new(tables, config, rng)?;
        engine.state = Some(state);
        Ok(engine)
    }

    // === Actions ===

    /// Start a new match, discarding any match in progress.
    ///
    /// Names are trimmed; a blank name is rejected and nothing changes.
    pub fn start_match(&mut self, player1: &str, player2: &str) -> Result<Events, MatchError> {
        let player1 = player1.trim();
        let player2 = player2.trim();
        if player1.is_empty() {
            return Err(MatchError::BlankName(PlayerId::Player1));
        }
        if player2.is_empty() {
            return Err(MatchError::BlankName(PlayerId::Player2));
        }

        let mut state = GameState::new(player1, player2, &self.config);
        state.record_action(Action::start_match(player1, player2));
        log::info!(
            "match started: {player1} vs {player2}, {} turns each",
            self.config.max_turns_per_player
        );
        self.state = Some(state);

        let mut events = Events::new();
        events.push(GameEvent::MatchStarted {
            player1: player1.to_string(),
            player2: player2.to_string(),
        });
        Ok(events)
    }

    /// Roll the die and draw a question. Valid in `Idle`.
    pub fn roll_dice(&mut self) -> Events {
        let Self { rng, state, .. } = self;
        let Some(state) = in_phase(state, Phase::Idle, "roll_dice") else {
            return Events::new();
        };

        let player = state.current_player;
        let value = rng.roll_die();
        state.record_action(Action::RollDice);
        state.last_roll = Some(value);
        state.phase = Phase::Rolling;

        let message = format!("{} rolled a {value}!", state.current().name);
        state.push_log(LogKind::Roll, message);
        log::debug!("{player} rolled {value}");

        let mut events = Events::new();
        events.push(GameEvent::DiceRolled { player, value });
        self.settle(&mut events);
        events
    }

    /// Answer the pending question. Valid in `AwaitingAnswer`.
    ///
    /// A correct answer moves the player by the roll; a wrong one keeps
    /// them in place and ends the turn with no challenge or tile event.
    pub fn submit_answer(&mut self, answered_true: bool) -> Events {
        let Some(state) = in_phase(&mut self.state, Phase::AwaitingAnswer, "submit_answer") else {
            return Events::new();
        };
        let Some(question) = state.current_question.take() else {
            log::debug!("ignoring submit_answer: no question drawn");
            return Events::new();
        };

        let player = state.current_player;
        let correct = question.is_correct(answered_true);
        state.record_action(Action::SubmitAnswer { answered_true });
        state.record_answer(correct);

        let mut events = Events::new();
        events.push(GameEvent::AnswerSubmitted {
            player,
            correct,
            streak: state.consecutive_correct,
        });

        let name = state.current().name.clone();
        if correct {
            let steps = state.last_roll.unwrap_or(0);
            let from = state.current().position;
            let to = state.move_player(player, steps);
            state.phase = Phase::Moving;
            state.push_log(
                LogKind::Positive,
                format!("{name} answered correctly and moved {steps} spaces!"),
            );
            events.push(GameEvent::Moved { player, from, to, steps });
        } else {
            let position = state.current().position;
            state.phase = Phase::Staying;
            state.push_log(LogKind::Negative, format!("{name} answered incorrectly and stays in place!"));
            events.push(GameEvent::Stayed { player, position });
        }

        self.settle(&mut events);
        events
    }

    /// Resolve the pending challenge. Valid in `ChallengeCheck`.
    ///
    /// `success` only matters for special events. A special event goes on
    /// to the tile event; the others end the turn.
    pub fn resolve_challenge(&mut self, success: bool) -> Events {
        let Self { config, state, .. } = self;
        let Some(state) = in_phase(state, Phase::ChallengeCheck, "resolve_challenge") else {
            return Events::new();
        };
        let Some(rule) = state.pending_challenge.take() else {
            log::debug!("ignoring resolve_challenge: nothing pending");
            return Events::new();
        };

        let player = state.current_player;
        state.record_action(Action::ResolveChallenge { success });
        let delta = rule.payout(success, config);
        let coins = state.apply_coins(player, delta);

        let message = format!(
            "{} completed \"{}\" ({} coins)",
            state.current().name,
            rule.title,
            signed(delta)
        );
        state.push_log(LogKind::for_delta(delta), message);
        log::debug!("{player} resolved \"{}\": {delta:+}, now {coins}", rule.title);

        state.phase = match rule.kind {
            ChallengeKind::Special => Phase::EventResolution,
            ChallengeKind::Bonus | ChallengeKind::Challenge => Phase::TurnAdvance,
        };

        let mut events = Events::new();
        events.push(GameEvent::ChallengeResolved {
            player,
            title: rule.title,
            success,
            delta,
            coins,
        });
        self.settle(&mut events);
        events
    }

    /// Perform one transition out of a phase that needs no input.
    ///
    /// Ignored in `Idle`, `AwaitingAnswer`, `ChallengeCheck` and `Ended`.
    pub fn advance(&mut self) -> Events {
        let mut events = Events::new();
        match self.state.as_mut() {
            Some(state) if state.phase.is_automatic() => state.record_action(Action::Advance),
            Some(state) => {
                log::debug!("ignoring advance in phase {:?}", state.phase);
                return events;
            }
            None => {
                log::debug!("ignoring advance: no match in progress");
                return events;
            }
        }

        self.step(&mut events);
        self.settle(&mut events);
        events
    }

    /// Discard the match in progress.
    pub fn reset_match(&mut self) -> Events {
        let mut events = Events::new();
        if self.state.take().is_some() {
            log::info!("match reset");
            events.push(GameEvent::MatchReset);
        } else {
            log::debug!("ignoring reset_match: no match in progress");
        }
        events
    }

    /// Dispatch an action value.
    pub fn apply(&mut self, action: &Action) -> Result<Events, MatchError> {
        match action {
            Action::StartMatch { player1, player2 } => self.start_match(player1, player2),
            Action::RollDice => Ok(self.roll_dice()),
            Action::SubmitAnswer { answered_true } => Ok(self.submit_answer(*answered_true)),
            Action::ResolveChallenge { success } => Ok(self.resolve_challenge(*success)),
            Action::Advance => Ok(self.advance()),
            Action::ResetMatch => Ok(self.reset_match()),
        }
    }

    /// Apply recorded actions in order.
    ///
    /// Against a source in the same state as the original run, this
    /// reproduces the original match.
    pub fn replay<'a>(&mut self, actions: impl IntoIterator<Item = &'a Action>) -> Result<(), MatchError> {
        for action in actions {
            self.apply(action)?;
        }
        Ok(())
    }

    // === Queries ===

    /// The match in progress.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// An owned copy of the match in progress. O(1) for history and log.
    #[must_use]
    pub fn snapshot(&self) -> Option<GameState> {
        self.state.clone()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.state.as_ref().map(|s| s.phase)
    }

    /// Standing result by coins. Meaningful at any time, final once ended.
    #[must_use]
    pub fn winner(&self) -> Option<MatchResult> {
        self.state.as_ref().map(resolve_winner)
    }

    /// Rank titles earned with the current balances.
    #[must_use]
    pub fn titles(&self) -> Option<PlayerMap<&'static str>> {
        self.state.as_ref().map(final_titles)
    }

    /// Fraction of questions answered correctly; `0.0` before any question.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.state.as_ref().map_or(0.0, GameState::accuracy)
    }

    /// Consecutive correct answers.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.state.as_ref().map_or(0, GameState::streak)
    }

    /// True once the final turn has advanced.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.as_ref().is_some_and(GameState::is_over)
    }

    /// 1-based round number.
    #[must_use]
    pub fn current_round(&self) -> Option<u32> {
        self.state.as_ref().map(GameState::current_round)
    }

    /// The question awaiting an answer.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.state.as_ref()?.current_question.as_ref()
    }

    /// The challenge awaiting resolution.
    #[must_use]
    pub fn pending_challenge(&self) -> Option<&ChallengeRule> {
        self.state.as_ref()?.pending_challenge.as_ref()
    }

    /// Die value for the turn in progress.
    #[must_use]
    pub fn last_roll(&self) -> Option<u8> {
        self.state.as_ref()?.last_roll
    }

    /// The game log.
    pub fn log(&self) -> impl Iterator<Item = &LogEntry> {
        self.state.iter().flat_map(|s| s.log.iter())
    }

    /// Accepted actions, in order.
    pub fn history(&self) -> impl Iterator<Item = &ActionRecord> {
        self.state.iter().flat_map(|s| s.history.iter())
    }

    /// Static tables.
    #[must_use]
    pub fn tables(&self) -> &GameTables {
        &self.tables
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The random source, e.g. to checkpoint a `GameRng`.
    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    // === Automatic phases ===

    /// Run automatic phases until one needs input, if enabled.
    fn settle(&mut self, events: &mut Events) {
        if self.config.auto_advance {
            while self.step(events) {}
        }
    }

    /// Leave the current automatic phase. Returns false if there is none.
    fn step(&mut self, events: &mut Events) -> bool {
        let Self {
            tables,
            config,
            rng,
            state,
        } = self;
        let Some(state) = state.as_mut() else {
            return false;
        };

        match state.phase {
            Phase::Rolling => draw_question(state, tables, rng, events),
            Phase::Moving => check_challenges(state, tables, config, rng, events),
            Phase::Staying => state.phase = Phase::TurnAdvance,
            Phase::EventResolution => resolve_tile_event(state, tables, events),
            Phase::TurnAdvance => finish_turn(state, events),
            Phase::Idle | Phase::AwaitingAnswer | Phase::ChallengeCheck | Phase::Ended => return false,
        }
        true
    }
}

/// The match, if one is in progress and in `expected` phase.
fn in_phase<'s>(state: &'s mut Option<GameState>, expected: Phase, action: &str) -> Option<&'s mut GameState> {
    let Some(state) = state.as_mut() else {
        log::debug!("ignoring {action}: no match in progress");
        return None;
    };
    if state.phase != expected {
        log::debug!("ignoring {action} in phase {:?}", state.phase);
        return None;
    }
    Some(state)
}

fn draw_question<R: RandomSource>(state: &mut GameState, tables: &GameTables, rng: &mut R, events: &mut Events) {
    let (index, question) = tables.questions.sample(rng);
    state.current_question = Some(question.clone());
    state.phase = Phase::AwaitingAnswer;
    events.push(GameEvent::QuestionDrawn {
        player: state.current_player,
        question: index,
    });
}

fn check_challenges<R: RandomSource>(
    state: &mut GameState,
    tables: &GameTables,
    config: &EngineConfig,
    rng: &mut R,
    events: &mut Events,
) {
    let player = state.current_player;
    let triggered = {
        let ctx = ConditionContext::new(state, player).with_special_event_chance(config.special_event_chance);
        ChallengeEvaluator::evaluate(&tables.challenges, &ctx, rng).cloned()
    };

    let Some(rule) = triggered else {
        state.phase = Phase::EventResolution;
        return;
    };

    log::debug!("{player} triggered challenge \"{}\"", rule.title);
    let announcement = rule.announcement(&state.current().name);
    state.push_log(LogKind::Neutral, announcement);
    events.push(GameEvent::ChallengeTriggered {
        player,
        title: rule.title.clone(),
        kind: rule.kind,
    });
    state.pending_challenge = Some(rule);
    state.phase = Phase::ChallengeCheck;
}

fn resolve_tile_event(state: &mut GameState, tables: &GameTables, events: &mut Events) {
    let player = state.current_player;
    let position = state.current().position;

    match tables.tiles.get(position) {
        Some(tile) => {
            let coins = state.apply_coins(player, tile.effect);
            let message = format!(
                "{} landed on {} ({} coins)",
                state.current().name,
                tile.title,
                signed(tile.effect)
            );
            state.push_log(LogKind::for_delta(tile.effect), message);
            events.push(GameEvent::TileEventApplied {
                player,
                tile: tile.index,
                effect: tile.effect,
                coins,
            });
        }
        None => {
            log::warn!("no tile at {position}; skipping tile event");
            events.push(GameEvent::TileEventSkipped { player, position });
        }
    }

    state.phase = Phase::TurnAdvance;
}

fn finish_turn(state: &mut GameState, events: &mut Events) {
    state.advance_turn();
    events.push(GameEvent::TurnAdvanced {
        turn_count: state.turn_count,
        next_player: state.current_player,
    });

    if !state.is_over() {
        log::debug!("turn {} of {}: {} to play", state.turn_count, state.total_turns(), state.current_player);
        return;
    }

    let result = resolve_winner(state);
    log::info!("match ended after {} turns: {result}", state.turn_count);
    let message = match result {
        MatchResult::Winner(player) => format!("{} wins!", state.player(player).name),
        MatchResult::Tie => "It's a tie!".to_string(),
    };
    state.push_log(LogKind::Neutral, message);
    events.push(GameEvent::MatchEnded { result });
}

/// `+5`, `-3`, `0`.
fn signed(delta: i32) -> String {
    if delta > 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}

//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Injectable**: the engine is generic over [`RandomSource`]
//! - **Deterministic**: same seed produces identical matches
//! - **Serializable**: O(1) state capture and restore
//!
//! Every random decision in a match (die, question draw, probability
//! triggers, challenge tie-break) goes through one source, in a fixed order.
//!
//! ```
//! use eco_quest::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.roll_die(), b.roll_die());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::ops::Range;

use super::board::DIE_FACES;

/// Source of randomness for the turn engine.
///
/// Implementors provide the two primitives; the game-level draws are
/// derived from them and may be overridden (tests script die rolls this way).
pub trait RandomSource {
    /// Uniform integer in `range`. `range` is never empty.
    fn gen_range_usize(&mut self, range: Range<usize>) -> usize;

    /// Uniform float in `[0, 1)`.
    fn gen_unit(&mut self) -> f64;

    /// Roll the die: uniform in `[1, DIE_FACES]`.
    fn roll_die(&mut self) -> u8 {
        let face = self.gen_range_usize(0..usize::from(DIE_FACES));
        u8::try_from(face).map_or(DIE_FACES, |f| f.min(DIE_FACES - 1) + 1)
    }

    /// Pick a uniform index into a collection of `len` items.
    ///
    /// Returns `None` if `len` is zero.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.gen_range_usize(0..len))
    }

    /// True with the given probability (`uniform(0,1) < probability`).
    fn chance(&mut self, probability: f64) -> bool {
        self.gen_unit() < probability
    }
}

/// Seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn gen_range_usize(&mut self, range: Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    fn gen_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position, so capture is O(1) regardless of how
/// many numbers have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// A random source with scripted answers, for tutorials and tests.
///
/// Queued die rolls, picks and unit draws are served first, in order. Once a
/// queue is empty the seeded fallback generator takes over.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    rolls: VecDeque<u8>,
    picks: VecDeque<usize>,
    units: VecDeque<f64>,
    fallback: GameRng,
}

impl ScriptedRng {
    /// Create a scripted source with an empty script.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rolls: VecDeque::new(),
            picks: VecDeque::new(),
            units: VecDeque::new(),
            fallback: GameRng::new(seed),
        }
    }

    /// Queue die results. Values are clamped into `[1, DIE_FACES]`.
    #[must_use]
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = u8>) -> Self {
        self.rolls
            .extend(rolls.into_iter().map(|r| r.clamp(1, DIE_FACES)));
        self
    }

    /// Queue index picks (question draws, tie-breaks). Values wrap into range.
    #[must_use]
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Queue unit draws used by probability triggers.
    #[must_use]
    pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units.extend(units);
        self
    }
}

impl RandomSource for ScriptedRng {
    fn gen_range_usize(&mut self, range: Range<usize>) -> usize {
        match self.picks.pop_front() {
            Some(pick) => range.start + pick % range.len(),
            None => self.fallback.gen_range_usize(range),
        }
    }

    fn gen_unit(&mut self) -> f64 {
        match self.units.pop_front() {
            Some(unit) => unit,
            None => self.fallback.gen_unit(),
        }
    }

    fn roll_die(&mut self) -> u8 {
        match self.rolls.pop_front() {
            Some(roll) => roll,
            None => self.fallback.roll_die(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_die(), rng2.roll_die());
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_die_range_covers_all_faces() {
        let mut rng = GameRng::new(7);
        let mut seen = [false; DIE_FACES as usize];

        for _ in 0..600 {
            let roll = rng.roll_die();
            assert!((1..=DIE_FACES).contains(&roll));
            seen[usize::from(roll - 1)] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_pick_index() {
        let mut rng = GameRng::new(42);
        assert_eq!(rng.pick_index(0), None);
        for _ in 0..20 {
            assert!(rng.pick_index(3).unwrap() < 3);
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = GameRng::new(42);
        for _ in 0..50 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn test_state_serialization() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.gen_range_usize(0..1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_range_usize(0..1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.gen_range_usize(0..1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_scripted_serves_queue_then_falls_back() {
        let mut rng = ScriptedRng::new(9)
            .with_rolls([4, 9])
            .with_picks([5])
            .with_units([0.25]);

        assert_eq!(rng.roll_die(), 4);
        assert_eq!(rng.roll_die(), DIE_FACES);
        assert_eq!(rng.gen_range_usize(0..3), 2);
        assert!((rng.gen_unit() - 0.25).abs() < f64::EPSILON);

        let mut fallback = GameRng::new(9);
        assert_eq!(rng.roll_die(), fallback.roll_die());
    }

    /// A source that ignores the requested range.
    struct Unbounded(usize);

    impl RandomSource for Unbounded {
        fn gen_range_usize(&mut self, range: Range<usize>) -> usize {
            range.end + self.0
        }

        fn gen_unit(&mut self) -> f64 {
            0.5
        }
    }

    #[test]
    fn test_roll_die_clamps_out_of_range_source() {
        assert_eq!(Unbounded(3).roll_die(), DIE_FACES);
        assert_eq!(Unbounded(usize::MAX - 6).roll_die(), DIE_FACES);
    }

    #[test]
    fn test_seed_survives_checkpoint() {
        let mut rng = GameRng::new(77);
        rng.roll_die();
        assert_eq!(rng.seed(), 77);
        assert_eq!(GameRng::from_state(&rng.state()).seed(), 77);
    }
}

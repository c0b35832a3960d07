//! True/false trivia questions.

use serde::{Deserialize, Serialize};

use crate::core::RandomSource;
use crate::error::ConfigError;

/// A true/false trivia question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "question")]
    pub text: String,
    pub answer: bool,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub source: String,
}

impl Question {
    /// Create a question with no explanation or source.
    pub fn new(text: impl Into<String>, answer: bool) -> Self {
        Self {
            text: text.into(),
            answer,
            explanation: String::new(),
            source: String::new(),
        }
    }

    /// Add an explanation (builder pattern).
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Add a source (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Whether a true/false answer is correct.
    #[must_use]
    pub fn is_correct(&self, answered_true: bool) -> bool {
        answered_true == self.answer
    }
}

/// Non-empty question pool, sampled with replacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionPool {
    questions: Vec<Question>,
}

impl QuestionPool {
    /// Build the pool, rejecting an empty list.
    pub fn new(questions: Vec<Question>) -> Result<Self, ConfigError> {
        if questions.is_empty() {
            return Err(ConfigError::EmptyQuestionPool);
        }
        Ok(Self { questions })
    }

    /// Draw a question uniformly at random. Returns its index and the question.
    ///
    /// An out-of-range pick from the random source falls back to the first
    /// question.
    pub fn sample<R: RandomSource>(&self, rng: &mut R) -> (usize, &Question) {
        let picked = rng.pick_index(self.questions.len()).unwrap_or(0);
        match self.questions.get(picked) {
            Some(question) => (picked, question),
            // Non-empty by construction.
            None => (0, &self.questions[0]),
        }
    }

    /// Get a question by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Number of questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed pool.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Iterate over all questions.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, ScriptedRng};

    #[test]
    fn test_is_correct() {
        let q = Question::new("Plants need light.", true);
        assert!(q.is_correct(true));
        assert!(!q.is_correct(false));
    }

    #[test]
    fn test_empty_pool_rejected() {
        assert!(matches!(QuestionPool::new(Vec::new()), Err(ConfigError::EmptyQuestionPool)));
    }

    #[test]
    fn test_sample_with_replacement() {
        let pool = QuestionPool::new(vec![
            Question::new("a", true),
            Question::new("b", false),
        ])
        .unwrap();

        let mut rng = ScriptedRng::new(0).with_picks([1, 1, 0]);
        assert_eq!(pool.sample(&mut rng).1.text, "b");
        assert_eq!(pool.sample(&mut rng).1.text, "b");
        assert_eq!(pool.sample(&mut rng).0, 0);
    }

    #[test]
    fn test_sample_stays_in_range() {
        let pool = QuestionPool::new(vec![Question::new("only", true)]).unwrap();
        let mut rng = GameRng::new(3);
        for _ in 0..10 {
            assert_eq!(pool.sample(&mut rng).0, 0);
        }
    }

    /// A source that ignores the requested range.
    struct Unbounded;

    impl RandomSource for Unbounded {
        fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
            range.end + 5
        }

        fn gen_unit(&mut self) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_sample_out_of_range_pick_falls_back() {
        let pool = QuestionPool::new(vec![Question::new("a", true), Question::new("b", false)]).unwrap();
        let (index, question) = pool.sample(&mut Unbounded);
        assert_eq!(index, 0);
        assert_eq!(pool.get(index), Some(question));
        assert_eq!(question.text, "a");
    }

    #[test]
    fn test_question_alias() {
        let q: Question = serde_json::from_str(
            r#"{"question": "Soil holds water.", "answer": true, "explanation": "It does.", "source": "SMAP"}"#,
        )
        .unwrap();
        assert_eq!(q.text, "Soil holds water.");
        assert_eq!(q.source, "SMAP");
    }
}

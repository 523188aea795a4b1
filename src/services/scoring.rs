use std::fmt;

use crate::models::domain::Test;

/// Outcome of grading one submission. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// Percentage of correct answers; a test without questions scores 0.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for Score {
    /// Two decimals, with ties rounded up (`1/800` is `0.13%`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.percentage() * 100.0).round() / 100.0;
        write!(f, "{:.2}%", rounded)
    }
}

/// Compares `answers[i]` against `questions[i].correct_answer`.
///
/// Missing, `null` and out-of-range answers count as wrong, and answers past
/// the last question are ignored. The answer key itself is trusted as-is.
pub fn score(test: &Test, answers: &[Option<i64>]) -> Score {
    let correct = test
        .questions
        .iter()
        .enumerate()
        .filter(|(i, question)| {
            answers.get(*i).copied().flatten() == Some(i64::from(question.correct_answer))
        })
        .count();

    Score {
        correct,
        total: test.questions.len(),
    }
}

use chrono::{DateTime, Utc};

use crate::model::{GameRecord, GameRecordError, QuizSettings};

/// Result of scoring a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
}

impl AnswerOutcome {
    #[must_use]
    pub fn from_correctness(is_correct: bool) -> Self {
        if is_correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Progress through one round of questions.
///
/// `question_index` stays within `0..total_questions`, and at most one answer
/// is counted per index, so `correct_count <= question_index + 1` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    question_index: u32,
    correct_count: u32,
    total_questions: u32,
    answered_current: bool,
}

impl SessionState {
    #[must_use]
    pub fn new(settings: &QuizSettings) -> Self {
        Self {
            question_index: 0,
            correct_count: 0,
            total_questions: settings.total_questions(),
            answered_current: false,
        }
    }

    #[must_use]
    pub fn question_index(&self) -> u32 {
        self.question_index
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// One-based label such as `3/10`.
    #[must_use]
    pub fn question_number(&self) -> String {
        format!("{}/{}", self.question_index + 1, self.total_questions)
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.question_index + 1 == self.total_questions
    }

    /// Count an answer for the current index.
    ///
    /// Returns `None` if this index was already scored.
    pub fn record_answer(&mut self, is_correct: bool) -> Option<AnswerOutcome> {
        if self.answered_current {
            return None;
        }
        self.answered_current = true;
        if is_correct {
            self.correct_count += 1;
        }
        Some(AnswerOutcome::from_correctness(is_correct))
    }

    /// Move to the next question. Returns `false` on the last question.
    pub fn advance(&mut self) -> bool {
        if self.is_last_question() {
            return false;
        }
        self.question_index += 1;
        self.answered_current = false;
        true
    }

    pub fn reset(&mut self) {
        self.question_index = 0;
        self.correct_count = 0;
        self.answered_current = false;
    }

    /// Record of this round, stamped at `finished_at`.
    ///
    /// # Errors
    ///
    /// Returns `GameRecordError` if the counters are inconsistent.
    pub fn to_game_record(&self, finished_at: DateTime<Utc>) -> Result<GameRecord, GameRecordError> {
        GameRecord::new(self.correct_count, self.total_questions, finished_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use std::time::Duration;

    fn state(total: u32) -> SessionState {
        SessionState::new(&QuizSettings::new(total, Duration::ZERO).unwrap())
    }

    #[test]
    fn starts_at_first_question() {
        let state = state(10);
        assert_eq!(state.question_index(), 0);
        assert_eq!(state.correct_count(), 0);
        assert_eq!(state.question_number(), "1/10");
    }

    #[test]
    fn counts_one_answer_per_question() {
        let mut state = state(3);
        assert_eq!(state.record_answer(true), Some(AnswerOutcome::Correct));
        assert_eq!(state.record_answer(true), None);
        assert_eq!(state.correct_count(), 1);

        assert!(state.advance());
        assert_eq!(state.record_answer(false), Some(AnswerOutcome::Incorrect));
        assert_eq!(state.correct_count(), 1);
    }

    #[test]
    fn never_advances_past_last_question() {
        let mut state = state(2);
        assert!(!state.is_last_question());
        assert!(state.advance());
        assert!(state.is_last_question());
        assert!(!state.advance());
        assert_eq!(state.question_index(), 1);
        assert_eq!(state.question_number(), "2/2");
    }

    #[test]
    fn reset_returns_to_start() {
        let mut state = state(2);
        state.record_answer(true);
        state.advance();
        state.reset();
        assert_eq!(state.question_index(), 0);
        assert_eq!(state.correct_count(), 0);
        assert_eq!(state.record_answer(false), Some(AnswerOutcome::Incorrect));
    }

    #[test]
    fn builds_game_record() {
        let mut state = state(2);
        state.record_answer(true);
        state.advance();
        state.record_answer(true);
        let record = state.to_game_record(fixed_now()).unwrap();
        assert_eq!((record.correct(), record.total()), (2, 2));
    }
}

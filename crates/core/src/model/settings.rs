use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("a session needs at least one question")]
    NoQuestions,
}

/// Session knobs passed to the presenter at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    total_questions: u32,
    pacing_delay: Duration,
}

impl QuizSettings {
    pub const DEFAULT_TOTAL_QUESTIONS: u32 = 10;
    pub const DEFAULT_PACING_DELAY: Duration = Duration::from_secs(1);

    /// # Errors
    ///
    /// Returns `SettingsError::NoQuestions` if `total_questions` is zero.
    pub fn new(total_questions: u32, pacing_delay: Duration) -> Result<Self, SettingsError> {
        if total_questions == 0 {
            return Err(SettingsError::NoQuestions);
        }
        Ok(Self {
            total_questions,
            pacing_delay,
        })
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// Delay between showing the answer highlight and moving on.
    #[must_use]
    pub fn pacing_delay(&self) -> Duration {
        self.pacing_delay
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            total_questions: Self::DEFAULT_TOTAL_QUESTIONS,
            pacing_delay: Self::DEFAULT_PACING_DELAY,
        }
    }
}

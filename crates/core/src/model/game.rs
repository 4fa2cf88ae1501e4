use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::format_date_time;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameRecordError {
    #[error("correct answers ({correct}) exceed total questions ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },
}

//
// ─── GAME RECORD ───────────────────────────────────────────────────────────────
//

/// Outcome of one finished quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    correct: u32,
    total: u32,
    date: DateTime<Utc>,
}

impl GameRecord {
    /// Build a record for a finished session.
    ///
    /// # Errors
    ///
    /// Returns `GameRecordError::CorrectExceedsTotal` if `correct > total`.
    pub fn new(correct: u32, total: u32, date: DateTime<Utc>) -> Result<Self, GameRecordError> {
        if correct > total {
            return Err(GameRecordError::CorrectExceedsTotal { correct, total });
        }
        Ok(Self {
            correct,
            total,
            date,
        })
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Strictly more correct answers wins; ties keep the existing record.
    #[must_use]
    pub fn is_better_than(&self, other: &GameRecord) -> bool {
        self.correct > other.correct
    }

    #[must_use]
    pub fn date_time_string(&self) -> String {
        format_date_time(self.date)
    }
}

//
// ─── AGGREGATES ────────────────────────────────────────────────────────────────
//

/// Snapshot of everything the statistics store knows about past games.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregateStatistics {
    pub games_count: u32,
    pub best_game: Option<GameRecord>,
    /// Percentage of correct answers over all stored games, in `[0, 100]`.
    pub total_accuracy: f64,
}

impl AggregateStatistics {
    #[must_use]
    pub fn new(games_count: u32, best_game: Option<GameRecord>, total_accuracy: f64) -> Self {
        Self {
            games_count,
            best_game,
            total_accuracy,
        }
    }

    /// Fold stored records (oldest first) into aggregate statistics.
    #[must_use]
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut best: Option<GameRecord> = None;
        let mut correct_sum = 0_u64;
        let mut total_sum = 0_u64;

        for record in records {
            correct_sum += u64::from(record.correct);
            total_sum += u64::from(record.total);
            best = match best {
                Some(current) if !record.is_better_than(&current) => Some(current),
                _ => Some(*record),
            };
        }

        Self {
            games_count: u32::try_from(records.len()).unwrap_or(u32::MAX),
            best_game: best,
            total_accuracy: accuracy_percent(correct_sum, total_sum),
        }
    }
}

/// `correct / total * 100`, or zero when nothing was asked.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn accuracy_percent(correct: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64 * 100.0
}

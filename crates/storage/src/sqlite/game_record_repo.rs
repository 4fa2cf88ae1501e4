use quiz_core::model::{AggregateStatistics, GameRecord, accuracy_percent};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{map_game_row, ser, u32_from_i64, u64_from_i64};
use crate::repository::{StatisticsStore, StorageError};

#[async_trait::async_trait]
impl StatisticsStore for SqliteRepository {
    async fn store(&self, record: &GameRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO game_records (correct, total, played_at)
                VALUES (?1, ?2, ?3)
            ",
        )
        .bind(i64::from(record.correct()))
        .bind(i64::from(record.total()))
        .bind(record.date())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn statistics(&self) -> Result<AggregateStatistics, StorageError> {
        let totals = sqlx::query(
            r"
                SELECT
                    COUNT(*) AS games,
                    COALESCE(SUM(correct), 0) AS correct_sum,
                    COALESCE(SUM(total), 0) AS total_sum
                FROM game_records
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let games_count = u32_from_i64("games", totals.try_get::<i64, _>("games").map_err(ser)?)?;
        let correct_sum = u64_from_i64(
            "correct_sum",
            totals.try_get::<i64, _>("correct_sum").map_err(ser)?,
        )?;
        let total_sum = u64_from_i64(
            "total_sum",
            totals.try_get::<i64, _>("total_sum").map_err(ser)?,
        )?;

        // Ties resolve to the earliest insert.
        let best_game = sqlx::query(
            r"
                SELECT correct, total, played_at
                FROM game_records
                ORDER BY correct DESC, id ASC
                LIMIT 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .map(|row| map_game_row(&row))
        .transpose()?;

        Ok(AggregateStatistics::new(
            games_count,
            best_game,
            accuracy_percent(correct_sum, total_sum),
        ))
    }
}

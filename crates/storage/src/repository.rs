use async_trait::async_trait;
use quiz_core::model::{AggregateStatistics, GameRecord};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable store of finished games and the statistics derived from them.
#[async_trait]
pub trait StatisticsStore: Send + Sync {
    /// Append a finished game.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn store(&self, record: &GameRecord) -> Result<(), StorageError>;

    /// Aggregate statistics over every stored game.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the records cannot be read.
    async fn statistics(&self) -> Result<AggregateStatistics, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    games: Arc<Mutex<Vec<GameRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            games: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Copy of every stored record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn records(&self) -> Result<Vec<GameRecord>, StorageError> {
        let guard = self
            .games
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl StatisticsStore for InMemoryRepository {
    async fn store(&self, record: &GameRecord) -> Result<(), StorageError> {
        let mut guard = self
            .games
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(*record);
        Ok(())
    }

    async fn statistics(&self) -> Result<AggregateStatistics, StorageError> {
        let guard = self
            .games
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(AggregateStatistics::from_records(&guard))
    }
}

/// Statistics backend behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub statistics: Arc<dyn StatisticsStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let statistics: Arc<dyn StatisticsStore> = Arc::new(repo);
        Self { statistics }
    }
}

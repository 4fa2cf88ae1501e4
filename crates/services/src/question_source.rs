use async_trait::async_trait;
use quiz_core::model::Question;

use crate::error::QuestionSourceError;

/// Supplies quiz questions, one request at a time.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the bulk data questions are drawn from.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError::Load` when the data cannot be fetched and
    /// `QuestionSourceError::Data` when the fetched data is unusable.
    async fn load_data(&self) -> Result<(), QuestionSourceError>;

    /// Produce the next question, or `None` if nothing is available.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError::Data` when a question cannot be built.
    async fn next_question(&self) -> Result<Option<Question>, QuestionSourceError>;
}

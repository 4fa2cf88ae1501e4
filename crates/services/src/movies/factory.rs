use std::sync::Mutex;

use async_trait::async_trait;
use quiz_core::model::Question;
use rand::Rng;

use crate::error::QuestionSourceError;
use crate::movies::loader::{MostPopularMovie, MoviesLoading};
use crate::question_source::QuestionSource;

const DEFAULT_RATING_THRESHOLD: f32 = 7.0;

/// Builds "is the rating above N?" questions from a cached movie list.
pub struct MovieQuestionFactory<L> {
    loader: L,
    movies: Mutex<Vec<MostPopularMovie>>,
    rating_threshold: f32,
}

impl<L: MoviesLoading> MovieQuestionFactory<L> {
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            movies: Mutex::new(Vec::new()),
            rating_threshold: DEFAULT_RATING_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_rating_threshold(mut self, threshold: f32) -> Self {
        self.rating_threshold = threshold;
        self
    }

    fn pick_movie(&self) -> Result<Option<MostPopularMovie>, QuestionSourceError> {
        let movies = self
            .movies
            .lock()
            .map_err(|e| QuestionSourceError::data(e.to_string()))?;
        if movies.is_empty() {
            return Ok(None);
        }
        let index = rand::rng().random_range(0..movies.len());
        Ok(movies.get(index).cloned())
    }

    fn question_text(&self) -> String {
        format!(
            "Is the rating of this movie greater than {}?",
            self.rating_threshold
        )
    }
}

#[async_trait]
impl<L: MoviesLoading> QuestionSource for MovieQuestionFactory<L> {
    async fn load_data(&self) -> Result<(), QuestionSourceError> {
        let payload = self
            .loader
            .load_movies()
            .await
            .map_err(QuestionSourceError::Load)?;

        if payload.items.is_empty() {
            let message = if payload.error_message.trim().is_empty() {
                "No movies available".to_owned()
            } else {
                payload.error_message
            };
            return Err(QuestionSourceError::Data(message));
        }

        let mut movies = self
            .movies
            .lock()
            .map_err(|e| QuestionSourceError::data(e.to_string()))?;
        *movies = payload.items;
        Ok(())
    }

    async fn next_question(&self) -> Result<Option<Question>, QuestionSourceError> {
        let Some(movie) = self.pick_movie()? else {
            return Ok(None);
        };

        let image = self
            .loader
            .load_image(&movie.resized_image_url())
            .await
            .map_err(|e| {
                tracing::warn!(title = %movie.title, error = %e, "poster download failed");
                QuestionSourceError::data("Failed to load poster")
            })?;

        let correct_answer = movie.rating_value() > self.rating_threshold;
        Ok(Some(Question::new(self.question_text(), image, correct_answer)))
    }
}

#![forbid(unsafe_code)]

pub mod error;
pub mod movies;
pub mod question_source;

pub use error::{MoviesLoaderError, QuestionSourceError};
pub use movies::{
    MostPopularMovie, MostPopularMovies, MovieQuestionFactory, MoviesLoader, MoviesLoaderConfig,
    MoviesLoading,
};
pub use question_source::QuestionSource;

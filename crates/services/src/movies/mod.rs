mod factory;
mod loader;

pub use factory::MovieQuestionFactory;
pub use loader::{MostPopularMovie, MostPopularMovies, MoviesLoader, MoviesLoaderConfig, MoviesLoading};

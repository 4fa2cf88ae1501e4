use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::MoviesLoaderError;

const DEFAULT_BASE_URL: &str = "https://tv-api.com";

#[derive(Clone, Debug)]
pub struct MoviesLoaderConfig {
    pub base_url: String,
    pub api_key: String,
}

impl MoviesLoaderConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
        }
    }

    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("MOVIE_QUIZ_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("MOVIE_QUIZ_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Some(Self { base_url, api_key })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn top_movies_url(&self) -> String {
        format!(
            "{}/en/API/Top250Movies/{}",
            self.base_url.trim_end_matches('/'),
            self.api_key
        )
    }
}

/// Movie list payload as returned by the Top-250 endpoint.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MostPopularMovies {
    #[serde(rename = "errorMessage", default)]
    pub error_message: String,
    #[serde(default)]
    pub items: Vec<MostPopularMovie>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MostPopularMovie {
    pub title: String,
    /// Title with the release year, e.g. `Heat (1995)`.
    #[serde(rename = "fullTitle", default)]
    pub full_title: Option<String>,
    #[serde(rename = "imDbRating", default)]
    pub rating: String,
    #[serde(rename = "image")]
    pub image_url: String,
}

impl MostPopularMovie {
    /// Poster URL rewritten to request a 600px wide rendition.
    #[must_use]
    pub fn resized_image_url(&self) -> String {
        let stem = self
            .image_url
            .split("._")
            .next()
            .unwrap_or(self.image_url.as_str());
        format!("{stem}._V0_UX600_.jpg")
    }

    /// Parsed rating; unparsable or missing ratings count as zero.
    #[must_use]
    pub fn rating_value(&self) -> f32 {
        self.rating.trim().parse().unwrap_or(0.0)
    }
}

/// Network access used by `MovieQuestionFactory`.
#[async_trait]
pub trait MoviesLoading: Send + Sync {
    /// # Errors
    ///
    /// Returns `MoviesLoaderError` when the list cannot be fetched or decoded.
    async fn load_movies(&self) -> Result<MostPopularMovies, MoviesLoaderError>;

    /// # Errors
    ///
    /// Returns `MoviesLoaderError` when the image cannot be downloaded.
    async fn load_image(&self, url: &str) -> Result<Vec<u8>, MoviesLoaderError>;
}

#[derive(Clone)]
pub struct MoviesLoader {
    client: Client,
    config: MoviesLoaderConfig,
}

impl MoviesLoader {
    #[must_use]
    pub fn new(config: MoviesLoaderConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl MoviesLoading for MoviesLoader {
    async fn load_movies(&self) -> Result<MostPopularMovies, MoviesLoaderError> {
        let response = self.client.get(self.config.top_movies_url()).send().await?;

        if !response.status().is_success() {
            return Err(MoviesLoaderError::HttpStatus(response.status()));
        }

        let body = response.bytes().await?;
        let movies: MostPopularMovies = serde_json::from_slice(&body)?;
        tracing::debug!(count = movies.items.len(), "loaded movie list");
        Ok(movies)
    }

    async fn load_image(&self, url: &str) -> Result<Vec<u8>, MoviesLoaderError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(MoviesLoaderError::HttpStatus(response.status()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

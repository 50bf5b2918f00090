//! Poster lookup against an external movie metadata service
//!
//! The provider only reports a poster path (or an error); the resolver turns
//! that into an image URL and hides every failure behind a placeholder.
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as HttpClient;
use tokio::sync::Semaphore;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::TmdbMovieDetails,
};

/// Trait for movie metadata providers that can locate a poster image
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Image path for the movie, `None` when the provider has no poster
    async fn fetch_poster_path(&self, movie_id: u64) -> AppResult<Option<String>>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

#[derive(Clone)]
pub struct TmdbPosterProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbPosterProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.poster_timeout(),
        )
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbPosterProvider {
    async fn fetch_poster_path(&self, movie_id: u64) -> AppResult<Option<String>> {
        let url = format!("{}/movie/{}", self.api_url.trim_end_matches('/'), movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", "en-US")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {} for movie {}",
                status, movie_id
            )));
        }

        let details: TmdbMovieDetails = response.json().await?;
        Ok(details.poster_path)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

/// Resolves movie ids to poster URLs, never failing
#[derive(Clone)]
pub struct PosterResolver {
    provider: Arc<dyn PosterProvider>,
    image_base_url: String,
    placeholder_url: String,
    permits: Arc<Semaphore>,
}

impl PosterResolver {
    pub fn new(
        provider: Arc<dyn PosterProvider>,
        image_base_url: String,
        placeholder_url: String,
        concurrency: usize,
    ) -> Self {
        Self {
            provider,
            image_base_url,
            placeholder_url,
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    pub fn from_config(provider: Arc<dyn PosterProvider>, config: &Config) -> Self {
        Self::new(
            provider,
            config.tmdb_image_base_url.clone(),
            config.poster_placeholder_url.clone(),
            config.poster_concurrency,
        )
    }

    /// Poster URL for one movie, or the placeholder on any failure
    pub async fn resolve_poster(&self, movie_id: u64) -> String {
        match self.provider.fetch_poster_path(movie_id).await {
            Ok(Some(path)) if !path.trim().is_empty() => self.image_url(&path),
            Ok(_) => {
                tracing::debug!(movie_id, provider = self.provider.name(), "No poster path");
                self.placeholder_url.clone()
            }
            Err(e) => {
                tracing::warn!(
                    movie_id,
                    provider = self.provider.name(),
                    error = %e,
                    "Poster fetch failed, using placeholder"
                );
                self.placeholder_url.clone()
            }
        }
    }

    /// Poster URLs for several movies, in the same order as `movie_ids`.
    ///
    /// Lookups run concurrently, bounded by the resolver's permit count.
    pub async fn resolve_posters(&self, movie_ids: &[u64]) -> Vec<String> {
        let mut tasks = Vec::with_capacity(movie_ids.len());

        for &movie_id in movie_ids {
            let resolver = self.clone();
            let task = tokio::spawn(async move {
                // The semaphore is never closed
                let _permit = resolver.permits.acquire().await.ok();
                resolver.resolve_poster(movie_id).await
            });
            tasks.push(task);
        }

        let mut posters = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(url) => posters.push(url),
                Err(e) => {
                    tracing::error!(error = %e, "Poster task join error");
                    posters.push(self.placeholder_url.clone());
                }
            }
        }

        posters
    }

    fn image_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.image_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

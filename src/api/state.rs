use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    services::{PosterProvider, PosterResolver, TmdbPosterProvider},
    store::{ArtifactStore, Artifacts},
};

/// Shared application state.
///
/// Everything here is read-only after start-up.
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<ArtifactStore>,
    pub posters: PosterResolver,
    pub recommendation_count: usize,
    pub max_recommendations: usize,
}

impl AppState {
    pub fn new(
        artifacts: Arc<ArtifactStore>,
        posters: PosterResolver,
        recommendation_count: usize,
        max_recommendations: usize,
    ) -> Self {
        Self {
            artifacts,
            posters,
            recommendation_count,
            max_recommendations: max_recommendations.max(recommendation_count),
        }
    }

    /// Wires the store and TMDB poster provider from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let provider: Arc<dyn PosterProvider> = Arc::new(TmdbPosterProvider::from_config(config)?);

        Ok(Self::new(
            Arc::new(ArtifactStore::new(&config.catalog_path, &config.matrix_path)),
            PosterResolver::from_config(provider, config),
            config.recommendation_count,
            config.max_recommendations,
        ))
    }

    /// State over in-memory artifacts, used by tests and tooling
    pub fn with_artifacts(artifacts: Artifacts, posters: PosterResolver) -> Self {
        Self::new(Arc::new(ArtifactStore::preloaded(artifacts)), posters, 5, 20)
    }
}

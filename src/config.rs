use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key used for poster lookups
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL that TMDB poster paths are appended to
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Image shown when a poster cannot be resolved
    #[serde(default = "default_poster_placeholder_url")]
    pub poster_placeholder_url: String,

    /// Per-request timeout for poster lookups, in seconds
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Maximum number of poster lookups in flight at once
    #[serde(default = "default_poster_concurrency")]
    pub poster_concurrency: usize,

    /// Catalog artifact path
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Compressed similarity matrix artifact path
    #[serde(default = "default_matrix_path")]
    pub matrix_path: String,

    /// Number of recommendations returned when the caller gives no limit
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Upper bound for a caller-supplied limit
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500/".to_string()
}

fn default_poster_placeholder_url() -> String {
    "https://via.placeholder.com/500x750?text=No+Image".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_poster_concurrency() -> usize {
    5
}

fn default_catalog_path() -> String {
    "artifacts/movie_list.bin".to_string()
}

fn default_matrix_path() -> String {
    "artifacts/similarity.bin.gz".to_string()
}

fn default_recommendation_count() -> usize {
    5
}

fn default_max_recommendations() -> usize {
    20
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn poster_timeout(&self) -> Duration {
        Duration::from_secs(self.poster_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

use serde::Deserialize;

mod movie;
mod similarity;

pub use movie::{Catalog, Movie};
pub use similarity::SimilarityMatrix;

// ============================================================================
// TMDB API Types
// ============================================================================

/// Subset of the TMDB `GET /movie/{id}` response the poster lookup needs
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmdb_details_with_poster() {
        let json = r#"{
            "id": 19995,
            "title": "Avatar",
            "poster_path": "/kyeqWdyUXW608qlYkRqosgbbJyK.jpg"
        }"#;

        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(
            details.poster_path,
            Some("/kyeqWdyUXW608qlYkRqosgbbJyK.jpg".to_string())
        );
    }

    #[test]
    fn test_tmdb_details_null_or_missing_poster() {
        let details: TmdbMovieDetails =
            serde_json::from_str(r#"{"id": 1, "poster_path": null}"#).unwrap();
        assert_eq!(details.poster_path, None);

        let details: TmdbMovieDetails = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(details.poster_path, None);
    }
}

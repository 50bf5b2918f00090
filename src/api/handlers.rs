use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::Movie,
    services::recommender,
};

use super::{page, AppState};

// Request/Response types

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieResponse {
    pub id: u64,
    pub title: String,
}

impl From<&Movie> for MovieResponse {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
        }
    }
}

/// Either `title` or `movie_id` selects the query movie
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    pub title: Option<String>,
    pub movie_id: Option<u64>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedMovie {
    pub id: u64,
    pub title: String,
    pub score: f32,
    pub poster_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub query: MovieResponse,
    pub recommendations: Vec<RecommendedMovie>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movies: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// Handlers

/// Health check endpoint, reporting whether the artifacts loaded
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.artifacts.get() {
        Ok(artifacts) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                movies: Some(artifacts.catalog.len()),
                loaded_at: Some(artifacts.loaded_at),
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable".to_string(),
                movies: None,
                loaded_at: None,
                error: Some(state.artifacts.load_error().unwrap_or_else(|| e.to_string())),
            }),
        ),
    }
}

/// Recommendation page
pub async fn index(State(state): State<AppState>) -> Response {
    match state.artifacts.get() {
        Ok(_) => Html(page::INDEX_HTML).into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Html(page::unavailable(&e.to_string())),
        )
            .into_response(),
    }
}

/// Full catalog in catalog order, for the selection control
pub async fn list_movies(State(state): State<AppState>) -> AppResult<Json<Vec<MovieResponse>>> {
    let artifacts = state.artifacts.get()?;
    let movies = artifacts
        .catalog
        .movies()
        .iter()
        .map(MovieResponse::from)
        .collect();
    Ok(Json(movies))
}

/// Top-k similar movies with poster images
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let artifacts = state.artifacts.get()?;

    let k = query.limit.unwrap_or(state.recommendation_count);
    if k == 0 || k > state.max_recommendations {
        return Err(AppError::InvalidInput(format!(
            "limit must be between 1 and {}",
            state.max_recommendations
        )));
    }

    let (query_index, results) = match (query.title.as_deref(), query.movie_id) {
        (Some(title), None) => {
            let index = artifacts.catalog.index_of_title(title)?;
            let results = recommender::recommend(title, &artifacts.catalog, &artifacts.matrix, k)?;
            (index, results)
        }
        (None, Some(movie_id)) => {
            let index = artifacts.catalog.index_of_id(movie_id)?;
            let results =
                recommender::recommend_by_id(movie_id, &artifacts.catalog, &artifacts.matrix, k)?;
            (index, results)
        }
        _ => {
            return Err(AppError::InvalidInput(
                "Provide exactly one of 'title' or 'movie_id'".to_string(),
            ))
        }
    };

    let selected = artifacts
        .catalog
        .get(query_index)
        .map(MovieResponse::from)
        .ok_or_else(|| AppError::Internal(format!("Catalog has no movie at row {}", query_index)))?;

    tracing::info!(
        request_id = %request_id,
        title = %selected.title,
        k = k,
        results = results.len(),
        "Processing recommendation request"
    );

    let posters = state.posters.resolve_posters(&results.ids).await;

    let recommendations = results
        .titles
        .into_iter()
        .zip(results.ids)
        .zip(results.scores)
        .zip(posters)
        .map(|(((title, id), score), poster_url)| RecommendedMovie {
            id,
            title,
            score,
            poster_url,
        })
        .collect();

    Ok(Json(RecommendationResponse {
        query: selected,
        recommendations,
    }))
}

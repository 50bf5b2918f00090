use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, SimilarityMatrix},
};

/// Top-k result as parallel sequences in descending-similarity order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendations {
    pub titles: Vec<String>,
    pub ids: Vec<u64>,
    pub scores: Vec<f32>,
}

impl Recommendations {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Recommends the `k` movies most similar to `selected_title`
pub fn recommend(
    selected_title: &str,
    catalog: &Catalog,
    matrix: &SimilarityMatrix,
    k: usize,
) -> AppResult<Recommendations> {
    let index = catalog.index_of_title(selected_title)?;
    recommend_for_index(index, catalog, matrix, k)
}

/// Recommends the `k` movies most similar to the movie with `movie_id`
pub fn recommend_by_id(
    movie_id: u64,
    catalog: &Catalog,
    matrix: &SimilarityMatrix,
    k: usize,
) -> AppResult<Recommendations> {
    let index = catalog.index_of_id(movie_id)?;
    recommend_for_index(index, catalog, matrix, k)
}

/// Ranks every other row of the matrix by its score against `index`.
///
/// Ties keep catalog order. The queried row itself is never returned.
pub fn recommend_for_index(
    index: usize,
    catalog: &Catalog,
    matrix: &SimilarityMatrix,
    k: usize,
) -> AppResult<Recommendations> {
    let row = matrix.row(index).ok_or_else(|| {
        AppError::Internal(format!(
            "Row {} is outside the {}x{} similarity matrix",
            index,
            matrix.size(),
            matrix.size()
        ))
    })?;

    let mut ranked: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|(candidate, _)| *candidate != index)
        .collect();

    // sort_by is stable, so equal scores stay in index order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k);

    tracing::debug!(
        query_index = index,
        k = k,
        top = ?ranked.iter().take(6).collect::<Vec<_>>(),
        "Ranked similarities"
    );

    let mut recommendations = Recommendations::default();
    for (candidate, score) in ranked {
        let movie = catalog.get(candidate).ok_or_else(|| {
            AppError::Internal(format!("Catalog has no movie at row {}", candidate))
        })?;
        recommendations.titles.push(movie.title.clone());
        recommendations.ids.push(movie.id);
        recommendations.scores.push(score);
    }

    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Movie;

    fn abcd() -> (Catalog, SimilarityMatrix) {
        let catalog = Catalog::new(vec![
            Movie::new(1, "A"),
            Movie::new(2, "B"),
            Movie::new(3, "C"),
            Movie::new(4, "D"),
        ])
        .unwrap();
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.9, 0.2, 0.5],
            vec![0.9, 1.0, 0.3, 0.1],
            vec![0.2, 0.3, 1.0, 0.7],
            vec![0.5, 0.1, 0.7, 1.0],
        ])
        .unwrap();
        (catalog, matrix)
    }

    #[test]
    fn test_top_two_for_a() {
        let (catalog, matrix) = abcd();
        let result = recommend("A", &catalog, &matrix, 2).unwrap();

        assert_eq!(result.titles, vec!["B", "D"]);
        assert_eq!(result.ids, vec![2, 4]);
        assert_eq!(result.scores, vec![0.9, 0.5]);
    }

    #[test]
    fn test_small_catalog_returns_what_is_available() {
        let catalog = Catalog::new(vec![
            Movie::new(10, "X"),
            Movie::new(20, "Y"),
            Movie::new(30, "Z"),
        ])
        .unwrap();
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.2, 0.6],
            vec![0.2, 1.0, 0.4],
            vec![0.6, 0.4, 1.0],
        ])
        .unwrap();

        let result = recommend("X", &catalog, &matrix, 5).unwrap();
        assert_eq!(result.titles, vec!["Z", "Y"]);
        assert_eq!(result.ids, vec![30, 20]);
    }

    #[test]
    fn test_every_title_gets_min_k_results_without_itself() {
        let (catalog, matrix) = abcd();

        for k in 0..6 {
            for movie in catalog.movies() {
                let result = recommend(&movie.title, &catalog, &matrix, k).unwrap();
                assert_eq!(result.len(), k.min(catalog.len() - 1));
                assert!(!result.ids.contains(&movie.id));
                assert!(result.scores.windows(2).all(|w| w[0] >= w[1]));
            }
        }
    }

    #[test]
    fn test_ties_break_by_catalog_order() {
        let catalog = Catalog::new(vec![
            Movie::new(1, "A"),
            Movie::new(2, "B"),
            Movie::new(3, "C"),
            Movie::new(4, "D"),
        ])
        .unwrap();
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.5, 0.5, 0.5],
            vec![0.5, 1.0, 0.0, 0.0],
            vec![0.5, 0.0, 1.0, 0.0],
            vec![0.5, 0.0, 0.0, 1.0],
        ])
        .unwrap();

        let first = recommend("A", &catalog, &matrix, 3).unwrap();
        let second = recommend("A", &catalog, &matrix, 3).unwrap();

        assert_eq!(first.ids, vec![2, 3, 4]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_query_excluded_even_when_another_ties_self_similarity() {
        let catalog =
            Catalog::new(vec![Movie::new(1, "A"), Movie::new(2, "B"), Movie::new(3, "C")])
                .unwrap();
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.1, 0.0],
            vec![0.1, 1.0, 1.0],
            vec![0.0, 1.0, 1.0],
        ])
        .unwrap();

        let result = recommend("C", &catalog, &matrix, 1).unwrap();
        assert_eq!(result.titles, vec!["B"]);
    }

    #[test]
    fn test_unknown_title() {
        let (catalog, matrix) = abcd();
        let result = recommend("E", &catalog, &matrix, 2);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_recommend_by_id() {
        let (catalog, matrix) = abcd();

        let result = recommend_by_id(3, &catalog, &matrix, 2).unwrap();
        assert_eq!(result.titles, vec!["D", "B"]);

        let missing = recommend_by_id(99, &catalog, &matrix, 2);
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_single_movie_catalog() {
        let catalog = Catalog::new(vec![Movie::new(1, "Solo")]).unwrap();
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();

        let result = recommend("Solo", &catalog, &matrix, 5).unwrap();
        assert!(result.is_empty());
    }
}

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, SimilarityMatrix},
};

pub mod format;

pub use format::{read_catalog, read_matrix, write_catalog, write_matrix};

/// Message shown to users when the artifacts could not be loaded
pub const LOAD_FAILURE_MESSAGE: &str =
    "Failed to load movie data. Please check that the artifact files exist.";

/// Catalog and similarity matrix, validated against each other
#[derive(Debug)]
pub struct Artifacts {
    pub catalog: Catalog,
    pub matrix: SimilarityMatrix,
    pub loaded_at: DateTime<Utc>,
}

impl Artifacts {
    /// Pairs a catalog with its matrix; both axes of the matrix must match
    /// the catalog length.
    pub fn new(catalog: Catalog, matrix: SimilarityMatrix) -> AppResult<Self> {
        if matrix.size() != catalog.len() {
            return Err(AppError::Artifact(format!(
                "Similarity matrix is {0}x{0} but the catalog has {1} movies",
                matrix.size(),
                catalog.len()
            )));
        }

        Ok(Self {
            catalog,
            matrix,
            loaded_at: Utc::now(),
        })
    }
}

/// Reads both artifacts from disk. A single attempt; nothing is returned
/// unless both files load and agree on size.
pub fn load_catalog_and_matrix(catalog_path: &Path, matrix_path: &Path) -> AppResult<Artifacts> {
    let started = Instant::now();

    let catalog = read_catalog(catalog_path)?;
    let matrix = read_matrix(matrix_path)?;
    let artifacts = Artifacts::new(catalog, matrix)?;

    tracing::info!(
        catalog_path = %catalog_path.display(),
        matrix_path = %matrix_path.display(),
        movies = artifacts.catalog.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Loaded recommendation artifacts"
    );

    Ok(artifacts)
}

/// Process-wide, load-once access to the artifacts.
///
/// The first call to [`ArtifactStore::get`] performs the load; its outcome,
/// including a failure, is kept for the lifetime of the store.
pub struct ArtifactStore {
    catalog_path: PathBuf,
    matrix_path: PathBuf,
    cell: OnceLock<Result<Arc<Artifacts>, String>>,
}

impl ArtifactStore {
    pub fn new(catalog_path: impl Into<PathBuf>, matrix_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            matrix_path: matrix_path.into(),
            cell: OnceLock::new(),
        }
    }

    /// Store that is already initialized with in-memory artifacts
    pub fn preloaded(artifacts: Artifacts) -> Self {
        let store = Self::new(PathBuf::new(), PathBuf::new());
        let _ = store.cell.set(Ok(Arc::new(artifacts)));
        store
    }

    pub fn get(&self) -> AppResult<Arc<Artifacts>> {
        self.cell
            .get_or_init(|| {
                load_catalog_and_matrix(&self.catalog_path, &self.matrix_path)
                    .map(Arc::new)
                    .map_err(|e| {
                        tracing::error!(error = %e, "Failed to load recommendation artifacts");
                        e.to_string()
                    })
            })
            .clone()
            .map_err(|_| AppError::Unavailable(LOAD_FAILURE_MESSAGE.to_string()))
    }

    /// Load error, if the load has happened and failed
    pub fn load_error(&self) -> Option<String> {
        match self.cell.get() {
            Some(Err(e)) => Some(e.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Movie;
    use tempfile::tempdir;

    fn write_pair(dir: &Path, movies: Vec<Movie>, rows: Vec<Vec<f32>>) -> (PathBuf, PathBuf) {
        let catalog_path = dir.join("movie_list.bin");
        let matrix_path = dir.join("similarity.bin.gz");
        write_catalog(&catalog_path, &Catalog::new(movies).unwrap()).unwrap();
        write_matrix(&matrix_path, &SimilarityMatrix::from_rows(rows).unwrap()).unwrap();
        (catalog_path, matrix_path)
    }

    #[test]
    fn test_load_pair() {
        let dir = tempdir().unwrap();
        let (catalog_path, matrix_path) = write_pair(
            dir.path(),
            vec![Movie::new(1, "A"), Movie::new(2, "B")],
            vec![vec![1.0, 0.4], vec![0.4, 1.0]],
        );

        let artifacts = load_catalog_and_matrix(&catalog_path, &matrix_path).unwrap();
        assert_eq!(artifacts.catalog.len(), 2);
        assert_eq!(artifacts.matrix.get(0, 1), Some(0.4));
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let dir = tempdir().unwrap();
        let (catalog_path, matrix_path) = write_pair(
            dir.path(),
            vec![Movie::new(1, "A"), Movie::new(2, "B"), Movie::new(3, "C")],
            vec![vec![1.0, 0.4], vec![0.4, 1.0]],
        );

        let result = load_catalog_and_matrix(&catalog_path, &matrix_path);
        assert!(matches!(result, Err(AppError::Artifact(_))));
    }

    #[test]
    fn test_store_caches_failure() {
        let dir = tempdir().unwrap();
        let catalog_path = dir.path().join("movie_list.bin");
        let matrix_path = dir.path().join("similarity.bin.gz");
        let store = ArtifactStore::new(&catalog_path, &matrix_path);

        assert!(matches!(store.get(), Err(AppError::Unavailable(_))));
        assert!(store.load_error().is_some());

        // Files appearing later do not trigger a second attempt
        write_pair(
            dir.path(),
            vec![Movie::new(1, "A")],
            vec![vec![1.0]],
        );
        assert!(matches!(store.get(), Err(AppError::Unavailable(_))));
    }

    #[test]
    fn test_store_loads_once() {
        let dir = tempdir().unwrap();
        let (catalog_path, matrix_path) =
            write_pair(dir.path(), vec![Movie::new(1, "A")], vec![vec![1.0]]);
        let store = ArtifactStore::new(&catalog_path, &matrix_path);

        let first = store.get().unwrap();
        std::fs::remove_file(&catalog_path).unwrap();
        let second = store.get().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(store.load_error().is_none());
    }

    #[test]
    fn test_preloaded_store() {
        let artifacts = Artifacts::new(
            Catalog::new(vec![Movie::new(1, "A")]).unwrap(),
            SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap(),
        )
        .unwrap();

        let store = ArtifactStore::preloaded(artifacts);
        assert_eq!(store.get().unwrap().catalog.len(), 1);
    }
}

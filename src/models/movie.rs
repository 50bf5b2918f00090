use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A movie identity record from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    /// TMDB movie id
    pub id: u64,
    pub title: String,
}

impl Movie {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Ordered movie catalog.
///
/// A movie's position in the catalog is its row and column in the
/// similarity matrix.
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Movie>,
    index_by_id: HashMap<u64, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate movie ids
    pub fn new(movies: Vec<Movie>) -> AppResult<Self> {
        let mut index_by_id = HashMap::with_capacity(movies.len());

        for (index, movie) in movies.iter().enumerate() {
            if let Some(previous) = index_by_id.insert(movie.id, index) {
                return Err(AppError::Artifact(format!(
                    "Duplicate movie id {} at rows {} and {}",
                    movie.id, previous, index
                )));
            }
        }

        Ok(Self {
            movies,
            index_by_id,
        })
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    /// Row of the movie with the given title.
    ///
    /// Titles are matched exactly. A title shared by several rows is
    /// reported rather than resolved to an arbitrary one.
    pub fn index_of_title(&self, title: &str) -> AppResult<usize> {
        let mut matches = self
            .movies
            .iter()
            .enumerate()
            .filter(|(_, movie)| movie.title == title)
            .map(|(index, _)| index);

        let first = matches
            .next()
            .ok_or_else(|| AppError::NotFound(format!("Movie '{}' is not in the catalog", title)))?;

        let others = matches.count();
        if others > 0 {
            return Err(AppError::NotFound(format!(
                "Movie title '{}' is ambiguous ({} catalog entries); look it up by id instead",
                title,
                others + 1
            )));
        }

        Ok(first)
    }

    /// Row of the movie with the given id
    pub fn index_of_id(&self, id: u64) -> AppResult<usize> {
        self.index_by_id
            .get(&id)
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("Movie id {} is not in the catalog", id)))
    }
}

use crate::error::{AppError, AppResult};

/// Square item-item similarity matrix stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Builds a matrix from row-major scores.
    ///
    /// Every score must be finite so that ranking is a total order.
    pub fn new(size: usize, scores: Vec<f32>) -> AppResult<Self> {
        let expected = size.checked_mul(size).ok_or_else(|| {
            AppError::Artifact(format!("Similarity matrix size {} overflows", size))
        })?;

        if scores.len() != expected {
            return Err(AppError::Artifact(format!(
                "Similarity matrix of size {} needs {} scores, found {}",
                size,
                expected,
                scores.len()
            )));
        }

        if let Some(position) = scores.iter().position(|score| !score.is_finite()) {
            return Err(AppError::Artifact(format!(
                "Non-finite similarity score at row {}, column {}",
                position / size,
                position % size
            )));
        }

        Ok(Self { size, scores })
    }

    /// Builds a matrix from nested rows, which must all have the same length
    /// as the number of rows.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> AppResult<Self> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);

        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(AppError::Artifact(format!(
                    "Similarity matrix row {} has {} columns, expected {}",
                    index,
                    row.len(),
                    size
                )));
            }
            scores.extend(row);
        }

        Self::new(size, scores)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.size {
            return None;
        }
        let start = index * self.size;
        Some(&self.scores[start..start + self.size])
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f32> {
        self.row(row).and_then(|r| r.get(column).copied())
    }

    pub fn scores(&self) -> &[f32] {
        &self.scores
    }
}

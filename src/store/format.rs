//! On-disk artifact format
//!
//! Catalog file: bincode encoding of [`CatalogFile`].
//! Matrix file: gzip stream wrapping the bincode encoding of [`MatrixFile`],
//! scores row-major with `size * size` entries.
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, Movie, SimilarityMatrix},
};

pub const CATALOG_MAGIC: [u8; 4] = *b"MCAT";
pub const MATRIX_MAGIC: [u8; 4] = *b"MSIM";
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactHeader {
    pub magic: [u8; 4],
    pub version: u32,
}

impl ArtifactHeader {
    fn check(&self, expected: [u8; 4], path: &Path) -> AppResult<()> {
        if self.magic != expected {
            return Err(AppError::Artifact(format!(
                "{} is not a {} artifact",
                path.display(),
                String::from_utf8_lossy(&expected)
            )));
        }
        if self.version != FORMAT_VERSION {
            return Err(AppError::Artifact(format!(
                "{} has format version {}, expected {}",
                path.display(),
                self.version,
                FORMAT_VERSION
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogFile {
    pub header: ArtifactHeader,
    pub movies: Vec<Movie>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatrixFile {
    pub header: ArtifactHeader,
    pub size: u64,
    pub scores: Vec<f32>,
}

fn codec_error(path: &Path, e: bincode::Error) -> AppError {
    AppError::Artifact(format!("Failed to decode {}: {}", path.display(), e))
}

fn open(path: &Path) -> AppResult<File> {
    File::open(path).map_err(|e| AppError::Artifact(format!("Cannot open {}: {}", path.display(), e)))
}

pub fn write_catalog(path: &Path, catalog: &Catalog) -> AppResult<()> {
    let file = CatalogFile {
        header: ArtifactHeader {
            magic: CATALOG_MAGIC,
            version: FORMAT_VERSION,
        },
        movies: catalog.movies().to_vec(),
    };

    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, &file).map_err(|e| {
        AppError::Artifact(format!("Failed to encode {}: {}", path.display(), e))
    })?;
    writer.flush()?;
    Ok(())
}

pub fn read_catalog(path: &Path) -> AppResult<Catalog> {
    let reader = BufReader::new(open(path)?);
    let file: CatalogFile = bincode::deserialize_from(reader).map_err(|e| codec_error(path, e))?;
    file.header.check(CATALOG_MAGIC, path)?;
    Catalog::new(file.movies)
}

pub fn write_matrix(path: &Path, matrix: &SimilarityMatrix) -> AppResult<()> {
    let file = MatrixFile {
        header: ArtifactHeader {
            magic: MATRIX_MAGIC,
            version: FORMAT_VERSION,
        },
        size: matrix.size() as u64,
        scores: matrix.scores().to_vec(),
    };

    let mut encoder = GzEncoder::new(BufWriter::new(File::create(path)?), Compression::default());
    bincode::serialize_into(&mut encoder, &file).map_err(|e| {
        AppError::Artifact(format!("Failed to encode {}: {}", path.display(), e))
    })?;
    encoder.finish()?.flush()?;
    Ok(())
}

pub fn read_matrix(path: &Path) -> AppResult<SimilarityMatrix> {
    let mut decoder = GzDecoder::new(BufReader::new(open(path)?));
    let mut bytes = Vec::new();
    decoder.read_to_end(&mut bytes).map_err(|e| {
        AppError::Artifact(format!("Failed to decompress {}: {}", path.display(), e))
    })?;

    let file: MatrixFile = bincode::deserialize(&bytes).map_err(|e| codec_error(path, e))?;
    file.header.check(MATRIX_MAGIC, path)?;

    let size = usize::try_from(file.size)
        .map_err(|_| AppError::Artifact(format!("Matrix size {} is too large", file.size)))?;
    SimilarityMatrix::new(size, file.scores)
}

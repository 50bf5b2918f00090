use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use movie_recommender::{
    models::{Catalog, Movie, SimilarityMatrix},
    store::{self, Artifacts},
};

/// Converts an offline-computed catalog and similarity matrix from JSON into
/// the service's artifact files
#[derive(Parser, Debug)]
#[command(name = "import-artifacts")]
#[command(about = "Write recommender artifacts from JSON inputs", long_about = None)]
struct Args {
    /// JSON array of {"id": .., "title": ..} records, in matrix row order
    #[arg(long)]
    catalog_json: PathBuf,

    /// JSON array of rows, one per catalog entry
    #[arg(long)]
    matrix_json: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "artifacts")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let movies: Vec<Movie> = serde_json::from_slice(
        &fs::read(&args.catalog_json)
            .with_context(|| format!("reading {}", args.catalog_json.display()))?,
    )
    .with_context(|| format!("parsing {}", args.catalog_json.display()))?;

    let rows: Vec<Vec<f32>> = serde_json::from_slice(
        &fs::read(&args.matrix_json)
            .with_context(|| format!("reading {}", args.matrix_json.display()))?,
    )
    .with_context(|| format!("parsing {}", args.matrix_json.display()))?;

    let artifacts = Artifacts::new(Catalog::new(movies)?, SimilarityMatrix::from_rows(rows)?)?;

    fs::create_dir_all(&args.out_dir)?;
    let catalog_path = args.out_dir.join("movie_list.bin");
    let matrix_path = args.out_dir.join("similarity.bin.gz");

    store::write_catalog(&catalog_path, &artifacts.catalog)?;
    store::write_matrix(&matrix_path, &artifacts.matrix)?;

    // Read back through the service's loader before reporting success
    let reloaded = store::load_catalog_and_matrix(&catalog_path, &matrix_path)?;
    anyhow::ensure!(
        reloaded.matrix == artifacts.matrix,
        "matrix read back from {} differs from the input",
        matrix_path.display()
    );

    tracing::info!(
        movies = reloaded.catalog.len(),
        catalog = %catalog_path.display(),
        matrix = %matrix_path.display(),
        "Artifacts written"
    );

    Ok(())
}

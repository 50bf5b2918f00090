use movie_recommender::{
    api::{create_router, AppState},
    config::Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,movie_recommender=debug,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config)?;

    // Load the artifacts before accepting connections; a failure is kept and
    // served as a blocking error rather than aborting start-up.
    if let Err(e) = state.artifacts.get() {
        tracing::error!(
            error = %e,
            catalog_path = %config.catalog_path,
            matrix_path = %config.matrix_path,
            "Recommendations are unavailable"
        );
    }

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}

mod handlers;
mod page;
mod routes;
mod state;

pub use handlers::{
    HealthResponse, MovieResponse, RecommendationQuery, RecommendationResponse,
    RecommendedMovie,
};
pub use routes::create_router;
pub use state::AppState;

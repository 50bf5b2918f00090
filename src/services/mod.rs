pub mod posters;
pub mod recommender;

pub use posters::{PosterProvider, PosterResolver, TmdbPosterProvider};
pub use recommender::{recommend, recommend_by_id, Recommendations};

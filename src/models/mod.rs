pub mod movie;
pub mod recommendation;

pub use movie::{Catalog, Movie};
pub use recommendation::{Recommendations, ScoredMovie, NOT_FOUND_MESSAGE};

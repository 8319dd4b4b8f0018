pub mod book;
pub mod recommendation;

pub use book::{BookRecord, BookView};
pub use recommendation::{RecommendationKind, RecommendationResponse};

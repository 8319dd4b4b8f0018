//! # BookMe Engine
//!
//! Book recommendation engine with:
//! - Fuzzy title lookup (rapidfuzz weighted ratio)
//! - TF-IDF similarity over edition/author text
//! - Never-fail lookups (random fallback sample with a notice)
//! - Session-gated web pages and a CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bookme_engine::{Catalog, RecommendationEngine, RecommendQuery};
//!
//! fn main() -> anyhow::Result<()> {
//!     let catalog = Catalog::load("data/books.json")?;
//!     let engine = RecommendationEngine::new(catalog);
//!
//!     let response = engine.recommend(&RecommendQuery::new("the grate gatsby"));
//!     for book in &response.books {
//!         println!("{} - {}", book.title, book.author);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod pages;
pub mod ranking;
pub mod render;
#[cfg(feature = "server")]
pub mod server;
pub mod session;
pub mod similarity;

// Re-export primary types
pub use catalog::Catalog;
pub use config::AppConfig;
pub use crate::core::{BookRecord, BookView, RecommendationKind, RecommendationResponse};
pub use engine::{RecommendQuery, RecommendationEngine, DEFAULT_TOP_N};
pub use error::{BookEngineError, Result};
pub use pages::{Action, Page, PageController, Screen};
pub use render::rating_to_stars;
pub use session::{Session, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

use std::path::PathBuf;
use std::str::FromStr;

use crate::engine::DEFAULT_TOP_N;
use crate::error::{BookEngineError, Result};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON snapshot of the book dataset
    pub books_path: PathBuf,
    pub port: u16,
    /// Recommendations per lookup
    pub top_n: usize,
    /// Home page shows books with more reviews than this...
    pub home_min_reviews: u64,
    /// ...and a rating above this
    pub home_min_rating: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            books_path: PathBuf::from("data/books.json"),
            port: 8501,
            top_n: DEFAULT_TOP_N,
            home_min_reviews: 100,
            home_min_rating: 4.0,
        }
    }
}

impl AppConfig {
    /// Read `BOOKS_PATH`, `PORT`, `TOP_N`, `HOME_MIN_REVIEWS` and
    /// `HOME_MIN_RATING`, falling back to defaults for unset variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            books_path: lookup("BOOKS_PATH").map(PathBuf::from).unwrap_or(defaults.books_path),
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            top_n: parse_var(&lookup, "TOP_N")?.unwrap_or(defaults.top_n),
            home_min_reviews: parse_var(&lookup, "HOME_MIN_REVIEWS")?
                .unwrap_or(defaults.home_min_reviews),
            home_min_rating: parse_var(&lookup, "HOME_MIN_RATING")?
                .unwrap_or(defaults.home_min_rating),
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| BookEngineError::Config(format!("{}={:?}: {}", key, raw, e))),
    }
}

pub mod weighted;

pub use weighted::WeightedRatioMatcher;

/// Trait for fuzzy title matching implementations
pub trait TitleMatcher: Send + Sync {
    /// Best match for `query` among `titles`, ties going to the earliest title.
    /// `None` only when there is nothing to match against.
    fn best_match(&self, query: &str, titles: &[&str]) -> Option<TitleMatch>;

    /// Get matcher name for logging
    fn name(&self) -> &str;
}

/// Matched title with similarity score
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMatch {
    /// Position of the title in the searched list
    pub index: usize,
    pub title: String,
    /// Score (0.0 - 100.0)
    pub score: f64,
}

impl TitleMatch {
    pub fn new(index: usize, title: impl Into<String>, score: f64) -> Self {
        Self {
            index,
            title: title.into(),
            score,
        }
    }
}

use serde::{Deserialize, Serialize};
use crate::core::BookView;

/// How the recommendation list was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    /// Neighbours ranked by TF-IDF similarity
    Ranked,
    /// Random sample (no usable match)
    Fallback,
}

/// Recommendation list with lookup metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Recommended books, best first (random order for fallbacks)
    pub books: Vec<BookView>,

    pub kind: RecommendationKind,

    /// Title the query fuzzy-matched, if any
    #[serde(default)]
    pub matched_title: Option<String>,

    /// Fuzzy match score (0.0 - 100.0)
    pub match_score: f64,

    /// User-visible notice explaining a fallback
    #[serde(default)]
    pub notice: Option<String>,

    /// Lookup latency in milliseconds
    pub latency_ms: f64,

    /// Matcher used (weighted-ratio, ...)
    pub matcher: String,
}

impl RecommendationResponse {
    /// Create a new ranked response
    pub fn ranked(books: Vec<BookView>, matched_title: impl Into<String>, match_score: f64) -> Self {
        Self {
            books,
            kind: RecommendationKind::Ranked,
            matched_title: Some(matched_title.into()),
            match_score,
            notice: None,
            latency_ms: 0.0,
            matcher: String::from("unknown"),
        }
    }

    /// Create a new fallback response
    pub fn fallback(books: Vec<BookView>, notice: Option<String>) -> Self {
        Self {
            books,
            kind: RecommendationKind::Fallback,
            matched_title: None,
            match_score: 0.0,
            notice,
            latency_ms: 0.0,
            matcher: String::from("unknown"),
        }
    }

    pub fn with_matcher(mut self, matcher: impl Into<String>) -> Self {
        self.matcher = matcher.into();
        self
    }

    pub fn is_fallback(&self) -> bool {
        self.kind == RecommendationKind::Fallback
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        format!(
            "{} -> {} books ({:.0}%) [{}] {:?}",
            self.matched_title.as_deref().unwrap_or("<none>"),
            self.books.len(),
            self.match_score,
            self.matcher,
            self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BookRecord;

    #[test]
    fn test_ranked_response() {
        let books = vec![BookRecord::new("Emma", "Jane Austen").view()];
        let response = RecommendationResponse::ranked(books, "Persuasion", 90.0)
            .with_matcher("weighted-ratio");

        assert_eq!(response.kind, RecommendationKind::Ranked);
        assert!(!response.is_fallback());
        assert_eq!(response.matched_title.as_deref(), Some("Persuasion"));
        assert_eq!(response.display(), "Persuasion -> 1 books (90%) [weighted-ratio] Ranked");
    }

    #[test]
    fn test_fallback_response() {
        let response = RecommendationResponse::fallback(Vec::new(), Some("notice".to_string()));
        assert!(response.is_fallback());
        assert!(response.is_empty());
        assert_eq!(response.match_score, 0.0);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&RecommendationKind::Fallback).unwrap();
        assert_eq!(json, "\"fallback\"");
    }
}

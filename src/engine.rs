use rand::seq::index::sample;
use rand::Rng;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::Catalog;
use crate::core::{BookView, RecommendationResponse};
use crate::ranking::{TitleMatcher, WeightedRatioMatcher};
use crate::similarity::TfidfMatrix;

/// Default number of recommendations per lookup
pub const DEFAULT_TOP_N: usize = 6;

/// Recommendation query parameters
#[derive(Debug, Clone)]
pub struct RecommendQuery {
    pub title: String,
    pub top_n: usize,
}

impl RecommendQuery {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

/// Book recommendation engine: catalog, TF-IDF matrix and title matcher
///
/// Built once at startup and read-only afterwards.
pub struct RecommendationEngine {
    catalog: Catalog,
    matrix: TfidfMatrix,
    matcher: Arc<dyn TitleMatcher>,
}

impl RecommendationEngine {
    /// Create engine with the default weighted-ratio matcher
    pub fn new(catalog: Catalog) -> Self {
        Self::with_matcher(catalog, Arc::new(WeightedRatioMatcher::new()))
    }

    /// Create engine with a custom title matcher
    pub fn with_matcher(catalog: Catalog, matcher: Arc<dyn TitleMatcher>) -> Self {
        let start = Instant::now();
        let matrix = TfidfMatrix::fit_transform(&catalog.documents());

        tracing::info!(
            "✅ TF-IDF matrix built: {} rows x {} terms in {:.1}ms",
            matrix.rows(),
            matrix.dims(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Self {
            catalog,
            matrix,
            matcher,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn matrix(&self) -> &TfidfMatrix {
        &self.matrix
    }

    pub fn matcher_name(&self) -> &str {
        self.matcher.name()
    }

    /// Recommend books similar to the query title
    pub fn recommend(&self, query: &RecommendQuery) -> RecommendationResponse {
        self.recommend_with_rng(query, &mut rand::thread_rng())
    }

    /// Same as [`recommend`](Self::recommend) with an explicit RNG for the
    /// random fallback sample
    ///
    /// Never fails: every anomaly degrades to a random sample, with a notice
    /// when the anomaly is a data inconsistency.
    pub fn recommend_with_rng<R: Rng + ?Sized>(
        &self,
        query: &RecommendQuery,
        rng: &mut R,
    ) -> RecommendationResponse {
        let start = Instant::now();
        let titles = self.catalog.titles();

        let mut response = match self.matcher.best_match(&query.title, &titles) {
            None => {
                tracing::debug!("No candidate titles for '{}'", query.title);
                self.fallback(query.top_n, None, rng)
            }
            Some(m) if m.score <= 0.0 => {
                tracing::debug!("Zero match score for '{}'", query.title);
                self.fallback(query.top_n, None, rng)
            }
            Some(m) => match self.catalog.position_of_title(&m.title) {
                None => {
                    let notice = format!(
                        "No index found for the match '{}'. Providing fallback recommendations.",
                        m.title
                    );
                    tracing::warn!("⚠️ {}", notice);
                    self.fallback(query.top_n, Some(notice), rng)
                }
                Some(idx) => match self.neighbours(idx, query.top_n) {
                    None => {
                        let notice = format!(
                            "TF-IDF matrix is empty for the matched title '{}'. Providing fallback recommendations.",
                            m.title
                        );
                        tracing::warn!("⚠️ {}", notice);
                        self.fallback(query.top_n, Some(notice), rng)
                    }
                    Some(books) => RecommendationResponse::ranked(books, m.title, m.score),
                },
            },
        };

        response.latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        response = response.with_matcher(self.matcher.name());

        tracing::debug!("{} ({:.2}ms)", response.display(), response.latency_ms);
        response
    }

    /// Rank every row against row `idx`, drop the top entry (the book itself)
    /// and keep the next `top_n`
    fn neighbours(&self, idx: usize, top_n: usize) -> Option<Vec<BookView>> {
        let scores = self.matrix.linear_kernel(idx)?;

        let mut order: Vec<usize> = (0..scores.len()).collect();
        // Descending score; on equal scores the query row wins, then catalog order
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(Ordering::Equal)
                .then_with(|| (b == idx).cmp(&(a == idx)))
                .then_with(|| a.cmp(&b))
        });

        Some(
            order
                .into_iter()
                .skip(1)
                .take(top_n)
                .filter_map(|i| self.catalog.get(i))
                .map(|b| b.view())
                .collect(),
        )
    }

    /// Uniform random sample of `min(top_n, len)` records
    fn fallback<R: Rng + ?Sized>(
        &self,
        top_n: usize,
        notice: Option<String>,
        rng: &mut R,
    ) -> RecommendationResponse {
        let books = self.catalog.books();
        let amount = top_n.min(books.len());
        let picked = sample(rng, books.len(), amount)
            .into_iter()
            .map(|i| books[i].view())
            .collect();

        RecommendationResponse::fallback(picked, notice)
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        catalog: Catalog,
        matrix: TfidfMatrix,
        matcher: Arc<dyn TitleMatcher>,
    ) -> Self {
        Self {
            catalog,
            matrix,
            matcher,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BookRecord, RecommendationKind};
    use crate::ranking::TitleMatch;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            BookRecord::new("Emma", "Jane Austen").with_edition_author("Penguin Classics Jane Austen"),
            BookRecord::new("Persuasion", "Jane Austen").with_edition_author("Vintage Jane Austen"),
            BookRecord::new("Pride and Prejudice", "Jane Austen").with_edition_author("Penguin Jane Austen"),
            BookRecord::new("Dune", "Frank Herbert").with_edition_author("Ace Frank Herbert"),
            BookRecord::new("Dune Messiah", "Frank Herbert").with_edition_author("Ace Frank Herbert"),
            BookRecord::new("Neuromancer", "William Gibson").with_edition_author("Ace William Gibson"),
            BookRecord::new("Untitled", "Anonymous"),
        ])
    }

    /// Always reports the same fixed match
    struct FixedMatcher(Option<TitleMatch>);

    impl TitleMatcher for FixedMatcher {
        fn best_match(&self, _query: &str, _titles: &[&str]) -> Option<TitleMatch> {
            self.0.clone()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_exact_title_excludes_itself() {
        let engine = RecommendationEngine::new(catalog());
        let response = engine.recommend(&RecommendQuery::new("Emma").with_top_n(3));

        assert_eq!(response.kind, RecommendationKind::Ranked);
        assert_eq!(response.matched_title.as_deref(), Some("Emma"));
        assert_eq!(response.books.len(), 3);
        assert!(response.books.iter().all(|b| b.title != "Emma"));
        // the other Austen editions share the most terms
        let titles: Vec<&str> = response.books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(&titles[..2], &["Pride and Prejudice", "Persuasion"]);
        assert_eq!(response.matcher, "weighted-ratio");
    }

    #[test]
    fn test_result_length_capped_by_catalog() {
        let engine = RecommendationEngine::new(catalog());
        let response = engine.recommend(&RecommendQuery::new("Dune").with_top_n(50));

        assert_eq!(response.books.len(), engine.catalog().len() - 1);
        assert!(response.books.iter().all(|b| b.title != "Dune"));
        assert_eq!(response.books[0].title, "Dune Messiah");
    }

    #[test]
    fn test_empty_composite_text_still_excludes_itself() {
        let engine = RecommendationEngine::new(catalog());
        let response = engine.recommend(&RecommendQuery::new("Untitled"));

        assert_eq!(response.kind, RecommendationKind::Ranked);
        assert_eq!(response.books.len(), 6);
        assert!(response.books.iter().all(|b| b.title != "Untitled"));
    }

    #[test]
    fn test_zero_score_falls_back_to_random_sample() {
        let engine = RecommendationEngine::new(catalog());
        let mut rng = StdRng::seed_from_u64(7);
        let response = engine.recommend_with_rng(&RecommendQuery::new("?!").with_top_n(4), &mut rng);

        assert_eq!(response.kind, RecommendationKind::Fallback);
        assert!(response.notice.is_none());
        assert_eq!(response.books.len(), 4);
        let unique: HashSet<&str> = response.books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_fallback_sample_capped_by_catalog() {
        let engine = RecommendationEngine::new(catalog());
        let response = engine.recommend(&RecommendQuery::new("").with_top_n(100));

        assert!(response.is_fallback());
        assert_eq!(response.books.len(), 7);
    }

    #[test]
    fn test_empty_catalog() {
        let engine = RecommendationEngine::new(Catalog::from_records(Vec::new()));
        let response = engine.recommend(&RecommendQuery::new("Emma"));

        assert!(response.is_fallback());
        assert!(response.is_empty());
    }

    #[test]
    fn test_unknown_matched_title_gives_notice() {
        let matcher = FixedMatcher(Some(TitleMatch::new(0, "Ghost Book", 88.0)));
        let engine = RecommendationEngine::with_matcher(catalog(), Arc::new(matcher));
        let response = engine.recommend(&RecommendQuery::new("ghost"));

        assert!(response.is_fallback());
        assert_eq!(
            response.notice.as_deref(),
            Some("No index found for the match 'Ghost Book'. Providing fallback recommendations.")
        );
        assert_eq!(response.books.len(), 6);
    }

    #[test]
    fn test_missing_matrix_row_gives_notice() {
        let catalog = catalog();
        // matrix built over fewer rows than the catalog holds
        let matrix = TfidfMatrix::fit_transform(&["Penguin Classics Jane Austen"]);
        let engine = RecommendationEngine::from_parts(
            catalog,
            matrix,
            Arc::new(WeightedRatioMatcher::new()),
        );
        let response = engine.recommend(&RecommendQuery::new("Neuromancer"));

        assert!(response.is_fallback());
        assert_eq!(
            response.notice.as_deref(),
            Some("TF-IDF matrix is empty for the matched title 'Neuromancer'. Providing fallback recommendations.")
        );
    }

    #[test]
    fn test_no_match_from_matcher() {
        let engine = RecommendationEngine::with_matcher(catalog(), Arc::new(FixedMatcher(None)));
        let response = engine.recommend(&RecommendQuery::new("anything").with_top_n(2));

        assert!(response.is_fallback());
        assert!(response.notice.is_none());
        assert_eq!(response.books.len(), 2);
        assert_eq!(response.matcher, "fixed");
    }
}

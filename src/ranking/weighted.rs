use rapidfuzz::distance::indel;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::ranking::{TitleMatch, TitleMatcher};

/// Weighted-ratio fuzzy matcher built on rapidfuzz's Indel similarity
///
/// Scores are the best of the plain, token-sort and token-set ratios,
/// switching to partial (substring) ratios when one string is much longer
/// than the other. Both sides are normalized first, so case, accents and
/// punctuation do not affect the score.
pub struct WeightedRatioMatcher;

impl WeightedRatioMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Score two raw strings (0 - 100, integral)
    pub fn score(&self, query: &str, choice: &str) -> f64 {
        weighted_ratio(&normalize(query), &normalize(choice))
    }
}

impl Default for WeightedRatioMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleMatcher for WeightedRatioMatcher {
    fn best_match(&self, query: &str, titles: &[&str]) -> Option<TitleMatch> {
        let query = normalize(query);

        let mut best: Option<TitleMatch> = None;
        for (index, title) in titles.iter().enumerate() {
            let score = weighted_ratio(&query, &normalize(title));
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(TitleMatch::new(index, *title, score));
            }
            if score >= 100.0 {
                break;
            }
        }
        best
    }

    fn name(&self) -> &str {
        "weighted-ratio"
    }
}

/// NFKD, strip accents, lowercase, non-alphanumerics to spaces, trim
fn normalize(s: &str) -> String {
    let folded: String = s
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(|c| c.to_lowercase())
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    folded.trim().to_string()
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

/// Indel similarity as an integer percentage; inputs are already normalized
fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    (indel::normalized_similarity(a.chars(), b.chars()) * 100.0).round()
}

/// Best ratio of the shorter string against equal-length windows of the longer
fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long): (Vec<char>, Vec<char>) = if a.chars().count() <= b.chars().count() {
        (a.chars().collect(), b.chars().collect())
    } else {
        (b.chars().collect(), a.chars().collect())
    };
    if short.is_empty() {
        return 0.0;
    }

    let mut best: f64 = 0.0;
    for window in long.windows(short.len()) {
        let score = indel::normalized_similarity(short.iter().copied(), window.iter().copied()) * 100.0;
        best = best.max(score);
        if best >= 100.0 {
            break;
        }
    }
    best.round()
}

fn token_sort_ratio(a: &str, b: &str, partial: bool) -> f64 {
    let a = sorted_tokens(a).join(" ");
    let b = sorted_tokens(b).join(" ");
    if partial {
        partial_ratio(&a, &b)
    } else {
        ratio(&a, &b)
    }
}

fn token_set_ratio(a: &str, b: &str, partial: bool) -> f64 {
    let mut ta = sorted_tokens(a);
    let mut tb = sorted_tokens(b);
    ta.dedup();
    tb.dedup();

    let intersection: Vec<&str> = ta.iter().filter(|t| tb.contains(*t)).copied().collect();
    let diff_a: Vec<&str> = ta.iter().filter(|t| !tb.contains(*t)).copied().collect();
    let diff_b: Vec<&str> = tb.iter().filter(|t| !ta.contains(*t)).copied().collect();

    let sect = intersection.join(" ");
    let combined_a = format!("{} {}", sect, diff_a.join(" ")).trim().to_string();
    let combined_b = format!("{} {}", sect, diff_b.join(" ")).trim().to_string();

    let score = |x: &str, y: &str| if partial { partial_ratio(x, y) } else { ratio(x, y) };
    score(&sect, &combined_a)
        .max(score(&sect, &combined_b))
        .max(score(&combined_a, &combined_b))
}

/// Weighted combination of the ratios above
///
/// Every ratio is an integer before it is scaled, the scaled maximum is
/// rounded once more.
fn weighted_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let len_a = a.chars().count() as f64;
    let len_b = b.chars().count() as f64;
    let len_ratio = len_a.max(len_b) / len_a.min(len_b);

    const UNBASE_SCALE: f64 = 0.95;
    let base = ratio(a, b);

    let best = if len_ratio < 1.5 {
        base.max(token_sort_ratio(a, b, false) * UNBASE_SCALE)
            .max(token_set_ratio(a, b, false) * UNBASE_SCALE)
    } else {
        let partial_scale = if len_ratio <= 8.0 { 0.9 } else { 0.6 };
        base.max(partial_ratio(a, b) * partial_scale)
            .max(token_sort_ratio(a, b, true) * UNBASE_SCALE * partial_scale)
            .max(token_set_ratio(a, b, true) * UNBASE_SCALE * partial_scale)
    };
    best.round()
}

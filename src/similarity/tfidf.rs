use std::collections::{BTreeMap, HashMap, HashSet};

use crate::similarity::stopwords::is_stop_word;

/// Sparse row: `(term index, weight)` pairs sorted by term index
pub type SparseRow = Vec<(usize, f64)>;

/// TF-IDF document-term matrix, one L2-normalised row per document
#[derive(Debug, Clone, Default)]
pub struct TfidfMatrix {
    /// term → column index
    vocabulary: HashMap<String, usize>,
    /// IDF weight per column
    idf: Vec<f64>,
    rows: Vec<SparseRow>,
}

impl TfidfMatrix {
    /// Fit the vocabulary and IDF on `documents` and transform them
    ///
    /// Row `i` always corresponds to `documents[i]`, including empty
    /// documents, which become all-zero rows.
    pub fn fit_transform(documents: &[&str]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        // Sorted vocabulary keeps column order independent of hash seeds
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (idx, (term, df)) in doc_freq.iter().enumerate() {
            vocabulary.insert((*term).to_string(), idx);
            // Smoothed IDF: ln((1 + n) / (1 + df)) + 1
            idf.push(((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0);
        }

        let rows = tokenized
            .iter()
            .map(|tokens| weigh(tokens, &vocabulary, &idf))
            .collect();

        Self { vocabulary, idf, rows }
    }

    /// Number of rows (documents)
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (vocabulary size)
    pub fn dims(&self) -> usize {
        self.idf.len()
    }

    pub fn row(&self, idx: usize) -> Option<&SparseRow> {
        self.rows.get(idx)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }

    /// Linear kernel of row `idx` against every row
    ///
    /// Rows are unit length, so this is cosine similarity. Returns `None`
    /// when the matrix has no row at `idx`.
    pub fn linear_kernel(&self, idx: usize) -> Option<Vec<f64>> {
        let query = self.rows.get(idx)?;
        Some(self.rows.iter().map(|row| sparse_dot(query, row)).collect())
    }
}

/// Lowercase runs of two or more word characters, stop words removed
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| w.chars().count() > 1)
        .filter(|w| !is_stop_word(w))
        .map(|w| w.to_string())
        .collect()
}

fn weigh(tokens: &[String], vocabulary: &HashMap<String, usize>, idf: &[f64]) -> SparseRow {
    let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
    for token in tokens {
        if let Some(&idx) = vocabulary.get(token) {
            *counts.entry(idx).or_insert(0.0) += 1.0;
        }
    }

    let mut row: SparseRow = counts
        .into_iter()
        .map(|(idx, tf)| (idx, tf * idf[idx]))
        .collect();

    let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in row.iter_mut() {
            *w /= norm;
        }
    }
    row
}

/// Dot product of two index-sorted sparse rows
fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("The Hobbit: J.R.R. Tolkien (Houghton_Mifflin)"),
            vec!["hobbit", "tolkien", "houghton_mifflin"]
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize("a I of the").is_empty());
    }

    #[test]
    fn test_rows_align_with_documents() {
        let docs = ["penguin jane austen", "", "ace frank herbert"];
        let matrix = TfidfMatrix::fit_transform(&docs);

        assert_eq!(matrix.rows(), 3);
        assert!(matrix.row(1).unwrap().is_empty());
        assert!(matrix.row(3).is_none());
    }

    #[test]
    fn test_smoothed_idf() {
        let docs = ["austen emma", "austen persuasion", "herbert dune"];
        let matrix = TfidfMatrix::fit_transform(&docs);

        // df = 2 of n = 3
        let expected = (4.0f64 / 3.0).ln() + 1.0;
        assert!((matrix.idf("austen").unwrap() - expected).abs() < EPS);
        // df = 1 of n = 3
        let expected = 2.0f64.ln() + 1.0;
        assert!((matrix.idf("dune").unwrap() - expected).abs() < EPS);
        assert!(matrix.idf("the").is_none());
    }

    #[test]
    fn test_rows_are_unit_length() {
        let docs = ["penguin classics jane austen", "vintage jane austen austen"];
        let matrix = TfidfMatrix::fit_transform(&docs);

        for idx in 0..matrix.rows() {
            let norm: f64 = matrix.row(idx).unwrap().iter().map(|(_, w)| w * w).sum();
            assert!((norm - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_linear_kernel() {
        let docs = [
            "penguin jane austen",
            "vintage jane austen",
            "ace frank herbert",
            "",
        ];
        let matrix = TfidfMatrix::fit_transform(&docs);
        let scores = matrix.linear_kernel(0).unwrap();

        assert_eq!(scores.len(), 4);
        assert!((scores[0] - 1.0).abs() < EPS);
        assert!(scores[1] > 0.0 && scores[1] < 1.0);
        assert_eq!(scores[2], 0.0);
        assert_eq!(scores[3], 0.0);
        assert!(matrix.linear_kernel(4).is_none());
    }

    #[test]
    fn test_empty_corpus() {
        let matrix = TfidfMatrix::fit_transform(&[]);
        assert_eq!(matrix.rows(), 0);
        assert_eq!(matrix.dims(), 0);
        assert!(matrix.linear_kernel(0).is_none());
    }
}

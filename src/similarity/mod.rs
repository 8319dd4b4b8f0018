//! TF-IDF vectorization and linear-kernel similarity over the
//! edition/author text of each book.

pub mod stopwords;
pub mod tfidf;

pub use tfidf::{tokenize, SparseRow, TfidfMatrix};

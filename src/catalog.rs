use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::BookRecord;
use crate::error::{BookEngineError, Result};

/// Immutable book dataset loaded once at startup
///
/// Record order is significant: the similarity matrix is aligned with it
/// by position, so the catalog exposes no way to reorder or filter in place.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<BookRecord>,
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Build a catalog from in-memory records
    pub fn from_records(books: Vec<BookRecord>) -> Self {
        Self {
            books,
            source: None,
            loaded_at: Utc::now(),
        }
    }

    /// Load a JSON snapshot (array of book records)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| BookEngineError::Snapshot {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut catalog = Self::from_json(&raw).map_err(|e| BookEngineError::Snapshot {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        catalog.source = Some(path.to_path_buf());

        tracing::info!("📚 Loaded {} books from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse a JSON snapshot held in memory
    pub fn from_json(json: &str) -> Result<Self> {
        let books: Vec<BookRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(books))
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn get(&self, idx: usize) -> Option<&BookRecord> {
        self.books.get(idx)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.books.iter().map(|b| b.title.as_str()).collect()
    }

    /// Composite edition/author texts in record order
    pub fn documents(&self) -> Vec<&str> {
        self.books.iter().map(|b| b.edition_author.as_str()).collect()
    }

    /// First record whose trimmed title equals `title` trimmed
    pub fn position_of_title(&self, title: &str) -> Option<usize> {
        let wanted = title.trim();
        self.books.iter().position(|b| b.title.trim() == wanted)
    }

    /// Records shown on the home page, in catalog order
    pub fn featured(&self, min_reviews: u64, min_rating: f64) -> Vec<&BookRecord> {
        self.books
            .iter()
            .filter(|b| b.is_featured(min_reviews, min_rating))
            .collect()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

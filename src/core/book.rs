use serde::{Deserialize, Deserializer, Serialize};

/// Treat a missing or `null` text column as an empty string
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept review counts written as floats (`150.0`) by dataframe exports
fn deserialize_reviews<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ReviewValue {
        Int(u64),
        Float(f64),
    }

    match Option::<ReviewValue>::deserialize(deserializer)? {
        Some(ReviewValue::Int(n)) => Ok(n),
        Some(ReviewValue::Float(f)) if f >= 0.0 && f.is_finite() => Ok(f.trunc() as u64),
        Some(ReviewValue::Float(f)) => Err(Error::custom(format!("Invalid review count: {}", f))),
        None => Ok(0),
    }
}

/// One row of the book dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookRecord {
    /// Display title, also the fuzzy lookup key
    #[serde(alias = "Book-Title")]
    pub title: String,

    #[serde(default, alias = "Book-Author", deserialize_with = "deserialize_text")]
    pub author: String,

    /// Composite edition/author text used for vectorization
    #[serde(default, alias = "Edition_author", deserialize_with = "deserialize_text")]
    pub edition_author: String,

    /// Average rating (0.0-5.0)
    #[serde(default, alias = "Ratings")]
    pub rating: f64,

    /// Number of reviews
    #[serde(default, alias = "Reviews", deserialize_with = "deserialize_reviews")]
    pub reviews: u64,

    /// Cover image URL
    #[serde(default, alias = "Image-URL-M", deserialize_with = "deserialize_text")]
    pub image_url: String,
}

impl BookRecord {
    /// Create a new BookRecord with required fields
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            edition_author: String::new(),
            rating: 0.0,
            reviews: 0,
            image_url: String::new(),
        }
    }

    pub fn with_edition_author(mut self, text: impl Into<String>) -> Self {
        self.edition_author = text.into();
        self
    }

    pub fn with_rating(mut self, rating: f64, reviews: u64) -> Self {
        self.rating = rating;
        self.reviews = reviews;
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Popular and well rated enough for the home page
    pub fn is_featured(&self, min_reviews: u64, min_rating: f64) -> bool {
        self.reviews > min_reviews && self.rating > min_rating
    }

    /// Project the fields shown to the user
    pub fn view(&self) -> BookView {
        BookView {
            title: self.title.clone(),
            author: self.author.clone(),
            rating: self.rating,
            reviews: self.reviews,
            image_url: self.image_url.clone(),
        }
    }
}

/// Display projection of a [`BookRecord`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookView {
    pub title: String,
    pub author: String,
    pub rating: f64,
    pub reviews: u64,
    pub image_url: String,
}

//! Data models for link candidates, extracted articles, and digests.
//!
//! - [`LinkCandidate`]: a `(title, url)` pair that looks like a news link
//! - [`ArticleBody`]: the tagged outcome of article text extraction
//! - [`ArticleRecord`]: a candidate paired with its extracted body
//! - [`Digest`]: the ordered result of one query, ready to render
//!
//! All of these live for the duration of one query and are never persisted.

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};
use std::fmt;

/// A hyperlink that heuristically points at a news article.
///
/// Within one source page candidates are unique by `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkCandidate {
    /// Trimmed visible anchor text.
    pub title: String,
    /// Absolute article URL.
    pub url: String,
}

impl LinkCandidate {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Outcome of extracting narrative text from an article page.
///
/// Every failure mode is a named variant; [`fmt::Display`] renders the
/// variant as the text shown to readers in place of a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleBody {
    /// Concatenated narrative paragraphs.
    Text(String),
    /// The page could not be fetched, so there was nothing to extract.
    Unavailable,
    /// The page parsed but yielded no usable narrative text.
    NoValidContent,
    /// Extraction itself failed.
    ExtractionError,
}

impl ArticleBody {
    pub const UNAVAILABLE: &'static str = "no content available";
    pub const NO_VALID_CONTENT: &'static str = "no valid content extracted";
    pub const EXTRACTION_ERROR: &'static str = "error during extraction";

    pub fn is_text(&self) -> bool {
        matches!(self, ArticleBody::Text(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ArticleBody::Text(text) => text,
            ArticleBody::Unavailable => Self::UNAVAILABLE,
            ArticleBody::NoValidContent => Self::NO_VALID_CONTENT,
            ArticleBody::ExtractionError => Self::EXTRACTION_ERROR,
        }
    }
}

impl fmt::Display for ArticleBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ArticleBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A link candidate together with the text extracted from its page.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleRecord {
    pub title: String,
    pub url: String,
    pub body: ArticleBody,
}

impl ArticleRecord {
    pub fn new(candidate: LinkCandidate, body: ArticleBody) -> Self {
        Self {
            title: candidate.title,
            url: candidate.url,
            body,
        }
    }
}

/// The ordered result of one query.
///
/// `T` is [`LinkCandidate`] for the titles-only listing and
/// [`ArticleRecord`] for the full-content digest.
#[derive(Debug, Clone, Serialize)]
pub struct Digest<T> {
    /// Category label the query was made for.
    pub category: String,
    /// Local time the digest was assembled.
    pub generated_at: DateTime<Local>,
    pub entries: Vec<T>,
}

impl<T> Digest<T> {
    pub fn new(category: impl Into<String>, entries: Vec<T>) -> Self {
        Self {
            category: category.into(),
            generated_at: Local::now(),
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_body_sentinels() {
        assert_eq!(ArticleBody::Unavailable.to_string(), "no content available");
        assert_eq!(
            ArticleBody::NoValidContent.to_string(),
            "no valid content extracted"
        );
        assert_eq!(
            ArticleBody::ExtractionError.to_string(),
            "error during extraction"
        );
        assert_eq!(ArticleBody::Text("body".into()).to_string(), "body");
    }

    #[test]
    fn test_article_record_serializes_body_as_string() {
        let record = ArticleRecord::new(
            LinkCandidate::new("A headline", "https://example.com/news/1"),
            ArticleBody::NoValidContent,
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["title"], "A headline");
        assert_eq!(json["body"], "no valid content extracted");
    }

    #[test]
    fn test_digest_serialization() {
        let digest = Digest::new(
            "科技",
            vec![LinkCandidate::new("Some headline", "https://36kr.com/p/1")],
        );

        let json = serde_json::to_string(&digest).unwrap();
        assert!(json.contains("科技"));
        assert!(json.contains("generated_at"));
        assert!(json.contains("https://36kr.com/p/1"));
    }
}
